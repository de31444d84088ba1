//! Per-node column custody manager: epoch-scoped assignment, expiring
//! column storage with capacity eviction, and per-slot sample-column
//! selection.

use std::collections::HashMap;

use das_custody::{CustodyAssignment, compute_assignment, rotate_node_id};
use das_matrix::{ColumnIndex, NUMBER_OF_COLUMNS, NodeId};
use parking_lot::RwLock;
use sha3::{Digest, Keccak256};
use tracing::debug;

use crate::{
    errors::CustodyMgrError,
    types::{ColumnKey, RotationHistory, StoredColumn},
};

pub const SAMPLES_PER_SLOT: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustodyMgrConfig {
    pub custody_group_count: u64,
    pub column_expiry_epochs: u64,
    pub storage_capacity: usize,
}

impl Default for CustodyMgrConfig {
    fn default() -> Self {
        Self {
            custody_group_count: das_matrix::CUSTODY_REQUIREMENT,
            column_expiry_epochs: 4,
            storage_capacity: 4096,
        }
    }
}

struct Inner {
    assignment: CustodyAssignment,
    history: Option<RotationHistory>,
    storage: HashMap<ColumnKey, StoredColumn>,
}

pub struct CustodyManager {
    node_id: NodeId,
    config: CustodyMgrConfig,
    state: RwLock<Inner>,
}

impl CustodyManager {
    /// Constructs the manager with its genesis-epoch assignment already
    /// computed.
    pub fn new(node_id: NodeId, config: CustodyMgrConfig, genesis_epoch: u64) -> Result<Self, CustodyMgrError> {
        let assignment = compute_assignment(node_id, genesis_epoch, config.custody_group_count)?;
        Ok(Self {
            node_id,
            config,
            state: RwLock::new(Inner {
                assignment,
                history: None,
                storage: HashMap::new(),
            }),
        })
    }

    pub fn assignment(&self) -> CustodyAssignment {
        self.state.read().assignment.clone()
    }

    pub fn history(&self) -> Option<RotationHistory> {
        self.state.read().history.clone()
    }

    /// Recomputes the assignment for `epoch`, records the rotation, and
    /// eagerly expires any stored columns whose epoch is older than
    /// `epoch - column_expiry_epochs`.
    pub fn set_epoch(&self, epoch: u64, rotated_at: u64) -> Result<(), CustodyMgrError> {
        let new_assignment = compute_assignment(self.node_id, epoch, self.config.custody_group_count)?;

        let mut state = self.state.write();
        let previous = state.assignment.clone();

        state.history = Some(RotationHistory {
            previous_epoch: Some(previous.epoch),
            previous_columns: previous.column_indices.clone(),
            current_epoch: epoch,
            current_columns: new_assignment.column_indices.clone(),
            rotated_at,
            pending_migration: previous.column_indices != new_assignment.column_indices,
        });
        state.assignment = new_assignment;

        let cutoff = epoch.saturating_sub(self.config.column_expiry_epochs);
        let before = state.storage.len();
        state.storage.retain(|key, _| key.epoch >= cutoff);
        let expired = before - state.storage.len();
        if expired > 0 {
            debug!(epoch, expired, "expired stored columns on epoch rotation");
        }

        Ok(())
    }

    /// Stores a column's data under `(epoch, column_index)`. Fails if the
    /// key is already occupied. When at capacity, evicts the entry with
    /// the smallest `stored_at` before inserting.
    pub fn store_column(
        &self,
        column_index: ColumnIndex,
        epoch: u64,
        slot: u64,
        data: Vec<u8>,
        stored_at: u64,
        expires_at: u64,
    ) -> Result<(), CustodyMgrError> {
        let key = ColumnKey::new(epoch, column_index);
        let mut state = self.state.write();

        if state.storage.contains_key(&key) {
            return Err(CustodyMgrError::ColumnAlreadyStored(epoch, column_index));
        }

        if state.storage.len() >= self.config.storage_capacity {
            if let Some(oldest_key) = state
                .storage
                .iter()
                .min_by_key(|(_, column)| column.stored_at)
                .map(|(key, _)| *key)
            {
                state.storage.remove(&oldest_key);
            }
        }

        state.storage.insert(
            key,
            StoredColumn {
                index: column_index,
                epoch,
                slot,
                data,
                stored_at,
                expires_at,
            },
        );
        Ok(())
    }

    pub fn get_column(&self, epoch: u64, column_index: ColumnIndex) -> Option<StoredColumn> {
        self.state.read().storage.get(&ColumnKey::new(epoch, column_index)).cloned()
    }

    pub fn stored_count(&self) -> usize {
        self.state.read().storage.len()
    }

    /// Removes stored columns whose `expires_at <= current_time`.
    pub fn expire_columns(&self, current_time: u64) -> usize {
        let mut state = self.state.write();
        let before = state.storage.len();
        state.storage.retain(|_, column| column.expires_at > current_time);
        before - state.storage.len()
    }

    /// Derives `SAMPLES_PER_SLOT` unique column indices from the stream
    /// `H(H(node_id || slot_le8) || counter_le8)`, the same way required
    /// cells are derived for a custody challenge.
    pub fn select_sample_columns(&self, slot: u64) -> Vec<ColumnIndex> {
        let mut hasher = Keccak256::new();
        hasher.update(self.node_id.as_bytes());
        hasher.update(slot.to_le_bytes());
        let seed: [u8; 32] = hasher.finalize().into();

        let k = SAMPLES_PER_SLOT as usize;
        let mut columns = Vec::with_capacity(k);
        let max_iterations = 10 * k;

        for counter in 0..max_iterations {
            if columns.len() >= k {
                break;
            }

            let mut hasher = Keccak256::new();
            hasher.update(seed);
            hasher.update((counter as u64).to_le_bytes());
            let digest = hasher.finalize();

            let mut first8 = [0u8; 8];
            first8.copy_from_slice(&digest[0..8]);
            let column = u64::from_le_bytes(first8) % NUMBER_OF_COLUMNS;

            if !columns.contains(&column) {
                columns.push(column);
            }
        }

        columns.sort_unstable();
        columns
    }

    /// Rotates the node's effective identity for `epoch`: `H(node_id ||
    /// epoch_le8)`.
    pub fn rotated_identity(&self, epoch: u64) -> NodeId {
        rotate_node_id(self.node_id, epoch)
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
    fn set_epoch_records_rotation_history() {
        let manager = CustodyManager::new(node(1), CustodyMgrConfig::default(), 0).unwrap();
        manager.set_epoch(1, 100).unwrap();

        let history = manager.history().unwrap();
        assert_eq!(history.previous_epoch, Some(0));
        assert_eq!(history.current_epoch, 1);
        assert_eq!(history.rotated_at, 100);
    }

    #[test]
    fn store_column_rejects_duplicate_keys() {
        let manager = CustodyManager::new(node(1), CustodyMgrConfig::default(), 0).unwrap();
        manager.store_column(5, 0, 10, vec![1, 2, 3], 100, 200).unwrap();
        assert_eq!(
            manager.store_column(5, 0, 10, vec![4, 5, 6], 101, 201),
            Err(CustodyMgrError::ColumnAlreadyStored(0, 5))
        );
    }

    #[test]
    fn store_column_evicts_oldest_at_capacity() {
        let config = CustodyMgrConfig {
            storage_capacity: 2,
            ..CustodyMgrConfig::default()
        };
        let manager = CustodyManager::new(node(1), config, 0).unwrap();
        manager.store_column(1, 0, 0, vec![], 10, 1000).unwrap();
        manager.store_column(2, 0, 0, vec![], 20, 1000).unwrap();
        manager.store_column(3, 0, 0, vec![], 30, 1000).unwrap();

        assert_eq!(manager.stored_count(), 2);
        assert!(manager.get_column(0, 1).is_none(), "oldest entry must be evicted");
        assert!(manager.get_column(0, 2).is_some());
        assert!(manager.get_column(0, 3).is_some());
    }

    #[test]
    fn set_epoch_expires_columns_older_than_the_retention_window() {
        let config = CustodyMgrConfig {
            column_expiry_epochs: 1,
            ..CustodyMgrConfig::default()
        };
        let manager = CustodyManager::new(node(1), config, 0).unwrap();
        manager.store_column(1, 0, 0, vec![], 10, 1000).unwrap();
        manager.set_epoch(5, 100).unwrap();
        assert_eq!(manager.stored_count(), 0);
    }

    #[test]
    fn select_sample_columns_is_deterministic_and_unique() {
        let manager = CustodyManager::new(node(7), CustodyMgrConfig::default(), 0).unwrap();
        let a = manager.select_sample_columns(42);
        let b = manager.select_sample_columns(42);
        assert_eq!(a, b);
        assert_eq!(a.len(), SAMPLES_PER_SLOT as usize);

        let mut unique = a.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), a.len());
        for column in &a {
            assert!(*column < NUMBER_OF_COLUMNS);
        }
    }
}
