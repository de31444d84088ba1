use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustodyError {
    #[error("custody group count exceeds NUMBER_OF_CUSTODY_GROUPS")]
    InvalidCustodyCount,

    #[error("custody group index exceeds NUMBER_OF_CUSTODY_GROUPS")]
    InvalidCustodyGroupIndex,
}
