use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("column index {0} is out of range")]
    MsgColumnOOB(u64),

    #[error("blob index {0} is out of range")]
    MsgBlobOOB(u64),

    #[error("gossip message data is invalid: {0}")]
    MsgDataInvalid(String),
}
