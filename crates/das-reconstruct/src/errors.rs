use das_field::FieldError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("insufficient cells to reconstruct: got {got}, need at least {needed}")]
    InsufficientCells { got: usize, needed: usize },

    #[error("cell index {0} is out of range for the extended blob")]
    InvalidCellIndex(u64),

    #[error("duplicate cell index {0}")]
    DuplicateCellIndex(u64),

    #[error("field division by zero during interpolation")]
    FieldDivisionByZero,
}

impl From<FieldError> for ReconstructError {
    fn from(_: FieldError) -> Self {
        ReconstructError::FieldDivisionByZero
    }
}
