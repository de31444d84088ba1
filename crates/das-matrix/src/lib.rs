//! Shared protocol constants and pure-data types for the extended data
//! matrix: cells, columns, sidecars, and the node identifiers used to
//! derive custody.

pub mod constants;
pub mod errors;
pub mod types;

pub use constants::*;
pub use errors::MatrixError;
pub use types::{
    Cell, ColumnIndex, DataColumn, DataColumnSidecar, KzgCommitment, KzgProof, MatrixEntry,
    NodeId, RowIndex, verify_data_column_sidecar,
};
