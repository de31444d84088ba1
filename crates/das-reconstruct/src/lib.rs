//! Lagrange-interpolation reconstruction of blobs and block-level
//! extended matrices from a partial set of cells.

pub mod blob;
pub mod errors;
pub mod lagrange;
pub mod matrix;

pub use blob::{reconstruct_blob, recover_cells_and_proofs};
pub use errors::ReconstructError;
pub use lagrange::BarycentricWeights;
pub use matrix::recover_matrix;
