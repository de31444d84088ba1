//! Configurable blob-validation rules, run in order and accumulated
//! rather than early-returning.

use sha3::{Digest, Keccak256};

use crate::errors::ValidatorError;

/// Caller-supplied metadata a blob is validated against. A zeroed
/// `commitment` or `expiry` of `0` means "rule not applicable".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobMeta {
    pub commitment: [u8; 32],
    pub expiry: u64,
    pub current_slot: u64,
}

impl Default for BlobMeta {
    fn default() -> Self {
        Self {
            commitment: [0u8; 32],
            expiry: 0,
            current_slot: 0,
        }
    }
}

pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, blob: &[u8], meta: &BlobMeta) -> Result<(), ValidatorError>;
}

pub struct SizeRule {
    pub min: usize,
    pub max: usize,
}

impl ValidationRule for SizeRule {
    fn name(&self) -> &str {
        "size"
    }

    fn check(&self, blob: &[u8], _meta: &BlobMeta) -> Result<(), ValidatorError> {
        if blob.len() < self.min || blob.len() > self.max {
            return Err(ValidatorError::SizeInvalid {
                actual: blob.len(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Conservative canonical-range approximation: when `strict_alignment`
/// is set, the blob length must be a multiple of `fe_size` and every
/// chunk's leading byte must be `< 0x73`.
pub struct FormatRule {
    pub strict_alignment: bool,
    pub fe_size: usize,
}

const CANONICAL_LEADING_BYTE_BOUND: u8 = 0x73;

impl ValidationRule for FormatRule {
    fn name(&self) -> &str {
        "format"
    }

    fn check(&self, blob: &[u8], _meta: &BlobMeta) -> Result<(), ValidatorError> {
        if !self.strict_alignment {
            return Ok(());
        }

        if self.fe_size == 0 || blob.len() % self.fe_size != 0 {
            return Err(ValidatorError::BlobValidateFormat(format!(
                "blob length {} is not a multiple of {}",
                blob.len(),
                self.fe_size
            )));
        }

        for chunk in blob.chunks(self.fe_size) {
            if chunk[0] >= CANONICAL_LEADING_BYTE_BOUND {
                return Err(ValidatorError::BlobValidateFormat(format!(
                    "chunk leading byte {:#x} is not below {CANONICAL_LEADING_BYTE_BOUND:#x}",
                    chunk[0]
                )));
            }
        }
        Ok(())
    }
}

pub struct CommitmentRule;

impl ValidationRule for CommitmentRule {
    fn name(&self) -> &str {
        "commitment"
    }

    fn check(&self, blob: &[u8], meta: &BlobMeta) -> Result<(), ValidatorError> {
        if meta.commitment == [0u8; 32] {
            return Ok(());
        }
        let digest: [u8; 32] = Keccak256::digest(blob).into();
        if digest != meta.commitment {
            return Err(ValidatorError::CommitmentMismatch);
        }
        Ok(())
    }
}

pub struct ExpiryRule;

impl ValidationRule for ExpiryRule {
    fn name(&self) -> &str {
        "expiry"
    }

    fn check(&self, _blob: &[u8], meta: &BlobMeta) -> Result<(), ValidatorError> {
        if meta.expiry == 0 {
            return Ok(());
        }
        if meta.current_slot > meta.expiry {
            return Err(ValidatorError::Expired {
                current_slot: meta.current_slot,
                expiry: meta.expiry,
            });
        }
        Ok(())
    }
}
