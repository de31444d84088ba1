//! Owns outstanding custody challenges and drives them through the
//! lifecycle in [`crate::state::ChallengeStatus`].

use std::collections::HashMap;

use das_matrix::NodeId;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{
    bond::{BondRegistry, SlashResult},
    challenge::{Challenge, generate_custody_challenge},
    errors::ChallengeError,
    response::{Response, verify_response},
    state::ChallengeStatus,
};

/// Tracks every outstanding challenge plus a per-node failure count used to
/// drive the penalty curve.
pub struct ChallengeManager {
    challenge_window: u64,
    pending: RwLock<HashMap<[u8; 32], Challenge>>,
    failures: RwLock<HashMap<NodeId, u32>>,
}

impl ChallengeManager {
    pub fn new(challenge_window: u64) -> Self {
        Self {
            challenge_window,
            pending: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
        }
    }

    /// Issues a new challenge for `(node_id, epoch)` and registers it as
    /// outstanding.
    pub fn issue_challenge(&self, node_id: NodeId, epoch: u64) -> Challenge {
        let challenge = generate_custody_challenge(node_id, epoch, self.challenge_window);
        self.pending.write().insert(challenge.challenge_id, challenge.clone());
        debug!(challenge_id = ?challenge.challenge_id, node = ?node_id, epoch, "issued custody challenge");
        challenge
    }

    pub fn pending_count(&self) -> usize {
        self.pending.read().len()
    }

    pub fn get(&self, challenge_id: [u8; 32]) -> Option<Challenge> {
        self.pending.read().get(&challenge_id).cloned()
    }

    /// Evaluates a challenge's status as of `current_slot`, without
    /// mutating state: `Slashable` once the deadline has passed while
    /// still outstanding.
    pub fn status(&self, challenge_id: [u8; 32], current_slot: u64) -> Option<ChallengeStatus> {
        let pending = self.pending.read();
        let challenge = pending.get(&challenge_id)?;
        if current_slot > challenge.deadline {
            Some(ChallengeStatus::Slashable)
        } else {
            Some(ChallengeStatus::Outstanding)
        }
    }

    /// Verifies that every required cell of `challenge_id` is covered by
    /// exactly one valid response, then resolves the challenge
    /// (`Outstanding -> Resolved`) and removes it from the pending set.
    /// A missing or invalid cell leaves the challenge outstanding and
    /// fails with `ResponseCountMismatch`; the caller may then drive it
    /// to `Slashable` via bond slashing once the deadline passes.
    pub fn respond_to_challenge(
        &self,
        challenge_id: [u8; 32],
        responses: &[Response],
    ) -> Result<(), ChallengeError> {
        let challenge = self
            .pending
            .read()
            .get(&challenge_id)
            .cloned()
            .ok_or(ChallengeError::NotFound(challenge_id.to_vec()))?;

        let mut covered: HashMap<u64, bool> =
            challenge.required_cells.iter().map(|&c| (c, false)).collect();

        for response in responses {
            verify_response(response, challenge_id, &challenge.required_cells)?;
            let seen = covered.get_mut(&response.cell_index).expect("checked by verify_response");
            if *seen {
                // duplicate valid response for the same cell; later ones
                // are redundant, not an error, but cannot double-cover.
                continue;
            }
            *seen = true;
        }

        if !covered.values().all(|&v| v) {
            return Err(ChallengeError::ResponseCountMismatch);
        }

        self.pending.write().remove(&challenge_id);
        debug!(challenge_id = ?challenge_id, "custody challenge resolved");
        Ok(())
    }

    /// Records a challenge failure for `node_id`, returning the updated
    /// failure count used to look up the penalty curve.
    pub fn record_failure(&self, node_id: NodeId) -> u32 {
        let mut failures = self.failures.write();
        let count = failures.entry(node_id).or_insert(0);
        *count += 1;
        warn!(node = ?node_id, failures = *count, "custody challenge failure recorded");
        *count
    }

    pub fn failure_count(&self, node_id: NodeId) -> u32 {
        self.failures.read().get(&node_id).copied().unwrap_or(0)
    }

    /// Slashes the bond backing a challenge that has become slashable.
    pub fn slash_for_challenge(
        &self,
        bonds: &BondRegistry,
        challenge_id: [u8; 32],
        node_id: NodeId,
    ) -> Result<SlashResult, ChallengeError> {
        let challenge = self
            .pending
            .read()
            .get(&challenge_id)
            .cloned()
            .ok_or(ChallengeError::NotFound(challenge_id.to_vec()))?;

        let bond = bonds.get(node_id).ok_or(ChallengeError::BondNotFound)?;
        let result = bonds.slash(node_id, bond.commitment)?;
        if result.slashed {
            self.pending.write().remove(&challenge.challenge_id);
            self.record_failure(node_id);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bond::{BondRegistry, MIN_STAKE, SlashingConfig},
        response::compute_response_proof,
    };

    use super::*;

    fn node(byte0: u8) -> NodeId {
        let mut bytes = [0u8; 32];
        bytes[0] = byte0;
        NodeId::new(bytes)
    }

    #[test]
    fn full_round_trip_resolves_and_clears_pending() {
        let manager = ChallengeManager::new(16);
        let challenge = manager.issue_challenge(node(0xDE), 100);
        assert_eq!(manager.pending_count(), 1);

        let responses: Vec<Response> = challenge
            .required_cells
            .iter()
            .map(|&cell_index| {
                let data = b"real cell data for verification".to_vec();
                let proof = compute_response_proof(challenge.challenge_id, cell_index, &data);
                Response {
                    challenge_id: challenge.challenge_id,
                    cell_index,
                    data,
                    proof,
                }
            })
            .collect();

        manager
            .respond_to_challenge(challenge.challenge_id, &responses)
            .unwrap();
        assert_eq!(manager.pending_count(), 0);
    }

    #[test]
    fn missing_cell_coverage_fails_and_keeps_challenge_pending() {
        let manager = ChallengeManager::new(16);
        let challenge = manager.issue_challenge(node(1), 1);

        let partial: Vec<Response> = challenge
            .required_cells
            .iter()
            .skip(1)
            .map(|&cell_index| {
                let data = b"data".to_vec();
                let proof = compute_response_proof(challenge.challenge_id, cell_index, &data);
                Response {
                    challenge_id: challenge.challenge_id,
                    cell_index,
                    data,
                    proof,
                }
            })
            .collect();

        assert_eq!(
            manager.respond_to_challenge(challenge.challenge_id, &partial),
            Err(ChallengeError::ResponseCountMismatch)
        );
        assert_eq!(manager.pending_count(), 1);
    }

    #[test]
    fn deadline_exceeded_marks_challenge_slashable() {
        let manager = ChallengeManager::new(0);
        let challenge = manager.issue_challenge(node(1), 0);
        assert_eq!(
            manager.status(challenge.challenge_id, challenge.deadline + 1),
            Some(ChallengeStatus::Slashable)
        );
    }

    #[test]
    fn slashing_removes_pending_challenge_and_records_failure() {
        let manager = ChallengeManager::new(0);
        let bonds = BondRegistry::new(SlashingConfig::default());
        let node_id = node(3);
        let challenge = manager.issue_challenge(node_id, 0);
        let bond = bonds.register(node_id, 0, MIN_STAKE, 1000).unwrap();
        assert_eq!(bond.commitment, bonds.get(node_id).unwrap().commitment);

        let result = manager
            .slash_for_challenge(&bonds, challenge.challenge_id, node_id)
            .unwrap();
        assert!(result.slashed);
        assert_eq!(manager.pending_count(), 0);
        assert_eq!(manager.failure_count(node_id), 1);
    }
}
