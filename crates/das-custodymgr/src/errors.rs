use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustodyMgrError {
    #[error("column already stored for (epoch={0}, column_index={1})")]
    ColumnAlreadyStored(u64, u64),

    #[error(transparent)]
    Custody(#[from] das_custody::CustodyError),
}
