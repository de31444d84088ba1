use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellMsgError {
    #[error("unsupported cell-message version {0:#x}")]
    CellMsgVersion(u8),

    #[error("failed to decode cell message: {0}")]
    CellMsgDecode(String),

    #[error("failed to decode batch: {0}")]
    BatchDecode(String),

    #[error("cell index {0} is out of range")]
    CellIdxOOB(u16),

    #[error("column index {0} is out of range")]
    ColumnIdxOOB(u16),

    #[error("row index {0} is out of range")]
    RowIdxOOB(u16),

    #[error("data must not be empty")]
    EmptyData,

    #[error("data length {0} exceeds the maximum cell size")]
    DataTooLarge(usize),

    #[error("proof length {0} exceeds 48 bytes")]
    ProofTooLarge(usize),
}
