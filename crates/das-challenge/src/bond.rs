//! Slashing-backed bonds that back custody challenge accountability.

use std::collections::HashMap;

use das_matrix::NodeId;
use parking_lot::RwLock;
use sha3::{Digest, Keccak256};

use crate::errors::ChallengeError;

/// Minimum stake, in the host chain's base unit, a node must post to be
/// eligible for custody challenges.
pub const MIN_STAKE: u64 = 32_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bond {
    pub node_id: NodeId,
    pub epoch: u64,
    pub commitment: [u8; 32],
    pub stake: u64,
    pub expires_at: u64,
}

/// `H(node_id || epoch_le8)`; deterministic in `(node_id, epoch)`.
pub fn compute_bond_commitment(node_id: NodeId, epoch: u64) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(node_id.as_bytes());
    hasher.update(epoch.to_le_bytes());
    hasher.finalize().into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashingConfig {
    pub slashing_penalty: u64,
}

impl Default for SlashingConfig {
    fn default() -> Self {
        Self {
            slashing_penalty: MIN_STAKE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlashResult {
    pub slashed: bool,
    pub penalty_applied: u64,
}

/// Owns the set of outstanding bonds, keyed by node. One bond per node at
/// a time; re-registering for a new epoch replaces the prior bond only via
/// explicit removal (slashing or expiry), never implicitly.
pub struct BondRegistry {
    config: SlashingConfig,
    bonds: RwLock<HashMap<NodeId, Bond>>,
}

impl BondRegistry {
    pub fn new(config: SlashingConfig) -> Self {
        Self {
            config,
            bonds: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a bond for `node_id` at `epoch`. Fails if `stake` is
    /// below `MIN_STAKE` or a bond is already registered for this node.
    pub fn register(
        &self,
        node_id: NodeId,
        epoch: u64,
        stake: u64,
        expires_at: u64,
    ) -> Result<Bond, ChallengeError> {
        if stake < MIN_STAKE {
            return Err(ChallengeError::InsufficientStake(stake));
        }

        let mut bonds = self.bonds.write();
        if bonds.contains_key(&node_id) {
            return Err(ChallengeError::BondAlreadyRegistered);
        }

        let bond = Bond {
            node_id,
            epoch,
            commitment: compute_bond_commitment(node_id, epoch),
            stake,
            expires_at,
        };
        bonds.insert(node_id, bond.clone());
        Ok(bond)
    }

    pub fn get(&self, node_id: NodeId) -> Option<Bond> {
        self.bonds.read().get(&node_id).cloned()
    }

    /// Slashes the bond for `node_id` if `challenge_id` matches the bond's
    /// commitment digest. Mismatch is a no-op (`slashed = false`), not an
    /// error; a missing bond fails with `BondNotFound`. On success the
    /// bond is removed and the penalty is `min(slashing_penalty, stake)`.
    pub fn slash(&self, node_id: NodeId, challenge_commitment: [u8; 32]) -> Result<SlashResult, ChallengeError> {
        let mut bonds = self.bonds.write();
        let bond = bonds.get(&node_id).ok_or(ChallengeError::BondNotFound)?;

        if bond.commitment != challenge_commitment {
            return Ok(SlashResult::default());
        }

        let penalty_applied = self.config.slashing_penalty.min(bond.stake);
        bonds.remove(&node_id);

        Ok(SlashResult {
            slashed: true,
            penalty_applied,
        })
    }

    pub fn len(&self) -> usize {
        self.bonds.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
