//! A deterministic, non-cryptographic `IntegritySigner` used by tests and
//! by hosts that have not yet wired in a real ML-DSA/Falcon/SPHINCS+
//! backend. It is not a security mechanism: `sign_commitment` derives a
//! "signature" as a keyed digest, never hardness against forgery.

use sha3::{Digest, Keccak256};

use crate::{
    algorithm::Algorithm,
    errors::IntegrityError,
    signer::{IntegritySignature, IntegritySigner, SigningInput, check_signature_shape},
};

pub struct MockSigner {
    algorithm: Algorithm,
    public_key: Vec<u8>,
    secret_key: Vec<u8>,
}

impl MockSigner {
    pub fn new(algorithm: Algorithm, public_key: Vec<u8>, secret_key: Vec<u8>) -> Self {
        Self {
            algorithm,
            public_key,
            secret_key,
        }
    }

    fn digest(&self, commitment_digest: [u8; 32], input: SigningInput) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(&self.secret_key);
        hasher.update(commitment_digest);
        hasher.update(input.to_bytes());
        hasher.finalize().into()
    }
}

impl IntegritySigner for MockSigner {
    fn algorithm_id(&self) -> Algorithm {
        self.algorithm
    }

    fn sign_commitment(
        &self,
        commitment_digest: [u8; 32],
        input: SigningInput,
    ) -> Result<IntegritySignature, IntegrityError> {
        if self.public_key.is_empty() {
            return Err(IntegrityError::EmptyKey);
        }
        let digest = self.digest(commitment_digest, input);
        Ok(IntegritySignature {
            algorithm: self.algorithm,
            public_key: self.public_key.clone(),
            signature: digest.to_vec(),
            commitment_digest,
            timestamp: input.slot_number,
        })
    }

    fn verify_integrity(
        &self,
        signature: &IntegritySignature,
        commitment_digest: [u8; 32],
    ) -> Result<bool, IntegrityError> {
        // Only the structural shape and the commitment digest are checked
        // here. A real ML-DSA/Falcon/SPHINCS+ backend
        // would additionally re-verify the signature bytes against the
        // original signing input and public key; that cryptographic step
        // is the opaque external capability this core does not implement.
        check_signature_shape(signature, commitment_digest, self.algorithm)?;
        Ok(self.public_key == signature.public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_and_verifies_round_trip() {
        let signer = MockSigner::new(Algorithm::MlDsa, vec![1, 2, 3], vec![9, 9, 9]);
        let input = SigningInput {
            merkle_root: [0x5; 32],
            blob_index: 1,
            slot_number: 2,
        };
        let commitment = [0x7; 32];
        let signature = signer.sign_commitment(commitment, input).unwrap();
        assert!(signer.verify_integrity(&signature, commitment).unwrap());
    }

    #[test]
    fn tampered_signature_is_rejected_for_commitment_mismatch() {
        let signer = MockSigner::new(Algorithm::Falcon, vec![1], vec![2]);
        let input = SigningInput {
            merkle_root: [0x5; 32],
            blob_index: 1,
            slot_number: 2,
        };
        let signature = signer.sign_commitment([0x7; 32], input).unwrap();
        assert_eq!(
            signer.verify_integrity(&signature, [0xFF; 32]),
            Err(IntegrityError::CommitmentMismatch)
        );
    }
}
