//! Deterministic custody-group and column assignment from a node identity,
//! with per-epoch rotation.

use das_matrix::{NUMBER_OF_COLUMNS, NUMBER_OF_CUSTODY_GROUPS, NodeId};
use sha3::{Digest, Keccak256};

use crate::errors::CustodyError;

/// The custody groups and columns a node must serve for one epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustodyAssignment {
    pub node_id: NodeId,
    pub epoch: u64,
    pub groups: Vec<u64>,
    pub column_indices: Vec<u64>,
}

/// Rotates a node's effective identity for `epoch` so that custody
/// deterministically shifts across epochs while remaining reproducible by
/// any observer: `H(node_id || epoch_le8)`.
pub fn rotate_node_id(node_id: NodeId, epoch: u64) -> NodeId {
    let mut hasher = Keccak256::new();
    hasher.update(node_id.as_bytes());
    hasher.update(epoch.to_le_bytes());
    NodeId::new(hasher.finalize().into())
}

/// Core custody-group derivation. Walks a sequential hash
/// chain seeded at `node_id`, taking `val mod NUMBER_OF_CUSTODY_GROUPS`
/// from the first 8 digest bytes (little-endian) of each step, until
/// `count` distinct groups have been collected.
///
/// The big-endian counter used to seed each hash saturates by wrapping to
/// zero on overflow rather than by clamping - this mirrors an unusual but
/// documented upstream behavior and is preserved exactly.
pub fn get_custody_groups(node_id: NodeId, count: u64) -> Result<Vec<u64>, CustodyError> {
    if count > NUMBER_OF_CUSTODY_GROUPS {
        return Err(CustodyError::InvalidCustodyCount);
    }

    if count == NUMBER_OF_CUSTODY_GROUPS {
        return Ok((0..NUMBER_OF_CUSTODY_GROUPS).collect());
    }

    let mut groups: Vec<u64> = Vec::with_capacity(count as usize);
    let mut current_id = *node_id.as_bytes();

    while (groups.len() as u64) < count {
        let digest = Keccak256::digest(current_id);

        let mut first8 = [0u8; 8];
        first8.copy_from_slice(&digest[0..8]);
        let group = u64::from_le_bytes(first8) % NUMBER_OF_CUSTODY_GROUPS;

        if !groups.contains(&group) {
            groups.push(group);
        }

        let mut carry = true;
        for byte in current_id.iter_mut().rev() {
            if carry {
                let (new_byte, overflow) = byte.overflowing_add(1);
                *byte = new_byte;
                carry = overflow;
            }
        }
    }

    groups.sort_unstable();
    Ok(groups)
}

/// Maps a custody group to the columns it governs:
/// `{ NUMBER_OF_CUSTODY_GROUPS * i + g : 0 <= i < NUMBER_OF_COLUMNS / NUMBER_OF_CUSTODY_GROUPS }`.
pub fn compute_columns_for_custody_group(group: u64) -> Result<Vec<u64>, CustodyError> {
    if group >= NUMBER_OF_CUSTODY_GROUPS {
        return Err(CustodyError::InvalidCustodyGroupIndex);
    }

    let stride = NUMBER_OF_COLUMNS / NUMBER_OF_CUSTODY_GROUPS;
    Ok((0..stride).map(|i| NUMBER_OF_CUSTODY_GROUPS * i + group).collect())
}

/// Computes the full custody assignment for a node at a given epoch,
/// rotating the node's identity first.
pub fn compute_assignment(
    node_id: NodeId,
    epoch: u64,
    custody_group_count: u64,
) -> Result<CustodyAssignment, CustodyError> {
    let rotated = rotate_node_id(node_id, epoch);
    let groups = get_custody_groups(rotated, custody_group_count)?;

    let mut column_indices: Vec<u64> = Vec::new();
    for &group in &groups {
        column_indices.extend(compute_columns_for_custody_group(group)?);
    }
    column_indices.sort_unstable();
    column_indices.dedup();

    Ok(CustodyAssignment {
        node_id,
        epoch,
        groups,
        column_indices,
    })
}
