//! Deterministic signing-input framing and the `IntegritySigner` capability.
//! The core does not implement ML-DSA, Falcon, or SPHINCS+
//! itself; it only shapes the input a real signer signs and validates the
//! structural invariants of the resulting signature.

use crate::{algorithm::Algorithm, errors::IntegrityError};

const SIGNING_DOMAIN: &[u8] = b"pq-blob-proof-v2";

/// The `(merkle_root, blob_index, slot_number)` triple a PQ blob proof
/// commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningInput {
    pub merkle_root: [u8; 32],
    pub blob_index: u64,
    pub slot_number: u64,
}

impl SigningInput {
    /// `"pq-blob-proof-v2" || merkle_root:32 || blob_index:8 (BE) || slot_number:8 (BE)`.
    pub fn to_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNING_DOMAIN.len() + 32 + 8 + 8);
        out.extend_from_slice(SIGNING_DOMAIN);
        out.extend_from_slice(&self.merkle_root);
        out.extend_from_slice(&self.blob_index.to_be_bytes());
        out.extend_from_slice(&self.slot_number.to_be_bytes());
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegritySignature {
    pub algorithm: Algorithm,
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
    pub commitment_digest: [u8; 32],
    pub timestamp: u64,
}

/// Capability a host injects to sign and verify commitments to blob data
/// using one of the post-quantum schemes named by [`Algorithm`]. Each
/// signer owns its own key pair; there is no global keystore.
pub trait IntegritySigner {
    fn algorithm_id(&self) -> Algorithm;

    fn sign_commitment(
        &self,
        commitment_digest: [u8; 32],
        input: SigningInput,
    ) -> Result<IntegritySignature, IntegrityError>;

    fn verify_integrity(
        &self,
        signature: &IntegritySignature,
        commitment_digest: [u8; 32],
    ) -> Result<bool, IntegrityError>;
}

/// Structural checks shared by every `IntegritySigner` implementation:
/// rejects the all-zero signature placeholder, empty keys/signatures, a
/// commitment-digest mismatch, and an algorithm mismatch between the
/// verifying signer and the signature being checked.
pub fn check_signature_shape(
    signature: &IntegritySignature,
    commitment_digest: [u8; 32],
    expected_algorithm: Algorithm,
) -> Result<(), IntegrityError> {
    if signature.public_key.is_empty() {
        return Err(IntegrityError::EmptyKey);
    }
    if signature.signature.is_empty() {
        return Err(IntegrityError::EmptySignature);
    }
    if signature.signature.iter().all(|&b| b == 0) {
        return Err(IntegrityError::ZeroSignature);
    }
    if signature.commitment_digest != commitment_digest {
        return Err(IntegrityError::CommitmentMismatch);
    }
    if signature.algorithm != expected_algorithm {
        return Err(IntegrityError::AlgorithmMismatch);
    }
    Ok(())
}
