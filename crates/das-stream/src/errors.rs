use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("chunk index {0} is out of range [0, {1})")]
    IndexOutOfRange(u64, u64),

    #[error("chunk {0} was already received")]
    DuplicateChunk(u64),

    #[error("chunk data length {0} exceeds chunk_size {1}")]
    ChunkTooLarge(usize, usize),

    #[error("session has been cancelled")]
    SessionCancelled,

    #[error("not all chunks have been received yet")]
    IncompleteStream,

    #[error("chunk proof does not match the expected digest")]
    ChunkVerification,

    #[error("maximum concurrent streams reached")]
    MaxSessionsReached,

    #[error("a session for blob_index {0} already exists")]
    DuplicateSession(u64),

    #[error("blob size {0} exceeds max_blob_size {1}")]
    BlobTooLarge(u64, u64),

    #[error("no session found for blob_index {0}")]
    SessionNotFound(u64),
}
