use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("data column sidecar failed structural validation: {0}")]
    InvalidSidecar(String),

    #[error("mismatched lengths between column, commitments, and proofs")]
    MismatchedLengths,
}
