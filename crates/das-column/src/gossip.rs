//! Gossip message shaping and deduplication for built columns.

use std::num::NonZeroUsize;

use das_field::BYTES_PER_CELL;
use das_matrix::{Cell, ColumnIndex, KzgProof, NUMBER_OF_COLUMNS};
use lru::LruCache;
use parking_lot::Mutex;
use sha3::{Digest, Keccak256};

use crate::errors::ColumnError;

pub const MAX_DEDUP: usize = 16_384;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGossipMessage {
    pub column_index: ColumnIndex,
    pub slot: u64,
    pub blob_index: u64,
    pub cell_data: Cell,
    pub proof: KzgProof,
    pub message_hash: [u8; 32],
}

impl ColumnGossipMessage {
    pub fn new(column_index: ColumnIndex, slot: u64, blob_index: u64, cell_data: Cell, proof: KzgProof) -> Self {
        let message_hash = hash_message(column_index, slot, blob_index, &cell_data, &proof);
        Self {
            column_index,
            slot,
            blob_index,
            cell_data,
            proof,
            message_hash,
        }
    }
}

fn hash_message(column_index: ColumnIndex, slot: u64, blob_index: u64, cell_data: &Cell, proof: &KzgProof) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(b"das-column-gossip-v1");
    hasher.update(column_index.to_le_bytes());
    hasher.update(slot.to_le_bytes());
    hasher.update(blob_index.to_le_bytes());
    hasher.update(cell_data);
    hasher.update(proof);
    hasher.finalize().into()
}

/// Bounds and shape checks. `max_blob_index` is the caller's current block
/// width (at most `MAX_BLOB_COMMITMENTS_PER_BLOCK`).
pub fn validate_gossip_message(msg: &ColumnGossipMessage, max_blob_index: u64) -> Result<(), ColumnError> {
    if msg.column_index >= NUMBER_OF_COLUMNS {
        return Err(ColumnError::MsgColumnOOB(msg.column_index));
    }
    if msg.blob_index >= max_blob_index {
        return Err(ColumnError::MsgBlobOOB(msg.blob_index));
    }
    if msg.cell_data.len() != BYTES_PER_CELL {
        return Err(ColumnError::MsgDataInvalid(format!(
            "cell data must be exactly {BYTES_PER_CELL} bytes"
        )));
    }
    if msg.proof.len() != 48 {
        return Err(ColumnError::MsgDataInvalid("proof must be exactly 48 bytes".into()));
    }
    Ok(())
}

/// Insertion-ordered deduplication of gossip messages by hash, bounded by
/// `MAX_DEDUP` with oldest-first eviction.
pub struct DedupCache {
    seen: Mutex<LruCache<[u8; 32], ()>>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::with_capacity(MAX_DEDUP)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            seen: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns `true` if this is the first time `hash` has been seen.
    pub fn insert(&self, hash: [u8; 32]) -> bool {
        let mut seen = self.seen.lock();
        if seen.contains(&hash) {
            false
        } else {
            seen.put(hash, ());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(column_index: ColumnIndex, blob_index: u64) -> ColumnGossipMessage {
        ColumnGossipMessage::new(column_index, 0, blob_index, [0u8; BYTES_PER_CELL], [0u8; 48])
    }

    #[test]
    fn rejects_out_of_range_column() {
        assert_eq!(
            validate_gossip_message(&msg(NUMBER_OF_COLUMNS, 0), 9),
            Err(ColumnError::MsgColumnOOB(NUMBER_OF_COLUMNS))
        );
    }

    #[test]
    fn rejects_out_of_range_blob() {
        assert_eq!(
            validate_gossip_message(&msg(0, 9), 9),
            Err(ColumnError::MsgBlobOOB(9))
        );
    }

    #[test]
    fn accepts_well_formed_message() {
        assert!(validate_gossip_message(&msg(0, 0), 9).is_ok());
    }

    #[test]
    fn dedup_cache_rejects_repeat_hashes() {
        let cache = DedupCache::with_capacity(4);
        let h = [1u8; 32];
        assert!(cache.insert(h));
        assert!(!cache.insert(h));
    }

    #[test]
    fn dedup_cache_evicts_oldest_first_at_capacity() {
        let cache = DedupCache::with_capacity(2);
        cache.insert([1u8; 32]);
        cache.insert([2u8; 32]);
        cache.insert([3u8; 32]);
        assert_eq!(cache.len(), 2);
        // [1;32] was the oldest and should have been evicted, so it is
        // seen as new again.
        assert!(cache.insert([1u8; 32]));
    }
}
