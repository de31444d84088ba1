use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("signature is the all-zero placeholder value")]
    ZeroSignature,

    #[error("public key must not be empty")]
    EmptyKey,

    #[error("signature must not be empty")]
    EmptySignature,

    #[error("signature's commitment digest does not match the expected digest")]
    CommitmentMismatch,

    #[error("signature algorithm does not match the verifying signer's algorithm")]
    AlgorithmMismatch,
}
