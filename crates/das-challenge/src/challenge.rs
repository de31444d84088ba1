//! Challenge generation.

use das_matrix::{CELLS_PER_EXT_BLOB, NodeId};
use sha3::{Digest, Keccak256};

/// Minimum distinct cell indices a custody challenge must cover.
pub const MIN_CELLS_PER_CHALLENGE: usize = 4;
/// Slots per epoch, used only to compute a challenge's deadline slot.
pub const SLOTS_PER_EPOCH: u64 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub challenge_id: [u8; 32],
    pub node_id: NodeId,
    pub epoch: u64,
    pub required_cells: Vec<u64>,
    pub deadline: u64,
}

/// Derives `k` unique cell indices from the stream
/// `H(node_id || epoch_le8 || counter_le8)`, taking `val mod
/// CELLS_PER_EXT_BLOB` from the first 8 digest bytes of each step and
/// skipping duplicates. Iteration is capped at `10*k` to guarantee
/// termination.
pub fn derive_challenge_cells(node_id: NodeId, epoch: u64, k: usize) -> Vec<u64> {
    let mut cells = Vec::with_capacity(k);
    let max_iterations = 10 * k.max(1);

    for counter in 0..max_iterations {
        if cells.len() >= k {
            break;
        }

        let mut hasher = Keccak256::new();
        hasher.update(node_id.as_bytes());
        hasher.update(epoch.to_le_bytes());
        hasher.update((counter as u64).to_le_bytes());
        let digest = hasher.finalize();

        let mut first8 = [0u8; 8];
        first8.copy_from_slice(&digest[0..8]);
        let cell = u64::from_le_bytes(first8) % CELLS_PER_EXT_BLOB as u64;

        if !cells.contains(&cell) {
            cells.push(cell);
        }
    }

    cells
}

fn compute_challenge_id(node_id: NodeId, epoch: u64, cells: &[u64]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(node_id.as_bytes());
    hasher.update(epoch.to_le_bytes());
    for cell in cells {
        hasher.update(cell.to_le_bytes());
    }
    hasher.finalize().into()
}

/// Generates a custody challenge for `(node_id, epoch)`.
pub fn generate_custody_challenge(node_id: NodeId, epoch: u64, challenge_window: u64) -> Challenge {
    let mut required_cells = derive_challenge_cells(node_id, epoch, MIN_CELLS_PER_CHALLENGE);
    required_cells.sort_unstable();

    let challenge_id = compute_challenge_id(node_id, epoch, &required_cells);
    let deadline = SLOTS_PER_EPOCH * (epoch + 1) + challenge_window;

    Challenge {
        challenge_id,
        node_id,
        epoch,
        required_cells,
        deadline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(byte0: u8) -> NodeId {
        let mut bytes = [0u8; 32];
        bytes[0] = byte0;
        NodeId::new(bytes)
    }

    #[test]
    fn derives_the_requested_number_of_distinct_cells() {
        let cells = derive_challenge_cells(node(1), 5, MIN_CELLS_PER_CHALLENGE);
        assert_eq!(cells.len(), MIN_CELLS_PER_CHALLENGE);
        let mut unique = cells.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), cells.len());
    }

    #[test]
    fn generation_is_deterministic_for_fixed_inputs() {
        // Challenge determinism: same (node_id, epoch) always yields the
        // same challenge_id and required_cells.
        let a = generate_custody_challenge(node(0xDE), 100, 16);
        let b = generate_custody_challenge(node(0xDE), 100, 16);
        assert_eq!(a, b);
    }

    #[test]
    fn deadline_tracks_epoch_and_challenge_window() {
        let challenge = generate_custody_challenge(node(1), 3, 10);
        assert_eq!(challenge.deadline, SLOTS_PER_EPOCH * 4 + 10);
    }
}
