use das_reconstruct::ReconstructError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("cell index {0} is out of range for the extended blob")]
    IndexOutOfRange(u64),

    #[error("reconstructor is closed")]
    ReconstructorClosed,

    #[error("insufficient cells to reconstruct blob {blob_index}: have {have}, need {need}")]
    InsufficientCells {
        blob_index: u64,
        have: usize,
        need: usize,
    },

    #[error("underlying reconstruction failed: {0}")]
    Reconstruction(#[from] ReconstructError),
}
