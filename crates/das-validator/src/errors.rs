use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    #[error("blob size {actual} is outside the bound [{min}, {max}]")]
    SizeInvalid { actual: usize, min: usize, max: usize },

    #[error("blob format is invalid: {0}")]
    BlobValidateFormat(String),

    #[error("blob commitment does not match the expected value")]
    CommitmentMismatch,

    #[error("blob has expired at slot {current_slot} (expiry {expiry})")]
    Expired { current_slot: u64, expiry: u64 },
}

/// One rule's failure, paired with the rule's name so callers can tell
/// which stage of the pipeline rejected the blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    pub rule: String,
    pub kind: ValidatorError,
}
