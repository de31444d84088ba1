//! Prime-field arithmetic over the BLS12-381 scalar field and the byte
//! layout of a single cell.

pub mod cell;
pub mod errors;
pub mod scalar;

pub use cell::{BYTES_PER_CELL, BYTES_PER_FIELD_ELEMENT, FIELD_ELEMENTS_PER_CELL, cell_to_field_elements, field_elements_to_bytes};
pub use errors::FieldError;
pub use scalar::FieldElement;
