use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    #[error("challenge {0:?} not found")]
    NotFound(Vec<u8>),

    #[error("required cells are not covered by exactly one valid response each")]
    ResponseCountMismatch,

    #[error("response challenge id does not match")]
    ChallengeIdMismatch,

    #[error("response cell index {0} is not among the required cells")]
    CellNotRequired(u64),

    #[error("response data or proof is empty")]
    EmptyResponseField,

    #[error("response proof does not match the expected digest")]
    ProofInvalid,

    #[error("merkle path does not reduce to the expected commitment digest")]
    MerklePathInvalid,

    #[error("bond for node is not registered")]
    BondNotFound,

    #[error("bond stake {0} is below the minimum required stake")]
    InsufficientStake(u64),

    #[error("a bond for this node and epoch is already registered")]
    BondAlreadyRegistered,

    #[error("challenge deadline has already passed")]
    DeadlineExceeded,
}
