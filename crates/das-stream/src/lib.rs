//! Chunked streaming reassembly sessions, one per blob, with
//! concurrency/size/timeout enforcement.

pub mod errors;
pub mod manager;
pub mod session;

pub use errors::StreamError;
pub use manager::{StreamManagerConfig, StreamSessionManager};
pub use session::{SessionProgress, StreamSession, verify_chunk};
