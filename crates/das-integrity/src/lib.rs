//! Post-quantum integrity adapter: an algorithm-tagged commitment-signing
//! capability and its batch verifier. The underlying ML-DSA /
//! Falcon / SPHINCS+ schemes themselves are out of scope; this crate only
//! frames the deterministic signing input, enforces the structural
//! invariants of a signature, and fans out batch verification.

pub mod algorithm;
pub mod batch;
pub mod errors;
pub mod mock;
pub mod signer;

pub use algorithm::Algorithm;
pub use batch::{BatchVerifyConfig, MAX_BATCH_WORKERS, verify_batch};
pub use errors::IntegrityError;
pub use mock::MockSigner;
pub use signer::{IntegritySignature, IntegritySigner, SigningInput, check_signature_shape};
