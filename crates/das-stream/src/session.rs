//! A single chunked-reassembly session targeting one blob.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use sha3::{Digest, Keccak256};

use crate::errors::StreamError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionProgress {
    pub received_chunks: usize,
    pub num_chunks: usize,
    pub bytes_received: u64,
}

/// `H(blob_index_le8 || total_size_le8 || creation_nanos_le8)`.
fn compute_session_id(blob_index: u64, total_size: u64, creation_nanos: u64) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(blob_index.to_le_bytes());
    hasher.update(total_size.to_le_bytes());
    hasher.update(creation_nanos.to_le_bytes());
    hasher.finalize().into()
}

pub struct StreamSession {
    pub session_id: [u8; 32],
    pub blob_index: u64,
    pub total_size: u64,
    pub chunk_size: u64,
    pub num_chunks: u64,
    chunks: parking_lot::RwLock<HashMap<u64, Vec<u8>>>,
    cancelled: AtomicBool,
    pub created_at: Instant,
}

impl StreamSession {
    pub fn new(blob_index: u64, total_size: u64, chunk_size: u64) -> Self {
        let num_chunks = total_size.div_ceil(chunk_size).max(1);
        let creation_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();

        Self {
            session_id: compute_session_id(blob_index, total_size, creation_nanos),
            blob_index,
            total_size,
            chunk_size,
            num_chunks,
            chunks: parking_lot::RwLock::new(HashMap::new()),
            cancelled: AtomicBool::new(false),
            created_at: Instant::now(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Records chunk `index`. Fails if the session is cancelled, the
    /// index is out of range, the chunk was already received, or `data`
    /// exceeds `chunk_size`.
    pub fn add_chunk(&self, index: u64, data: &[u8]) -> Result<(), StreamError> {
        if self.is_cancelled() {
            return Err(StreamError::SessionCancelled);
        }

        if index >= self.num_chunks {
            return Err(StreamError::IndexOutOfRange(index, self.num_chunks));
        }

        if data.len() as u64 > self.chunk_size {
            return Err(StreamError::ChunkTooLarge(data.len(), self.chunk_size as usize));
        }

        let mut chunks = self.chunks.write();
        if chunks.contains_key(&index) {
            return Err(StreamError::DuplicateChunk(index));
        }

        chunks.insert(index, data.to_vec());
        Ok(())
    }

    /// Concatenates all chunks in order, truncated to `total_size`. Fails
    /// if the session is cancelled or any chunk is missing.
    pub fn assemble(&self) -> Result<Vec<u8>, StreamError> {
        if self.is_cancelled() {
            return Err(StreamError::SessionCancelled);
        }

        let chunks = self.chunks.read();
        if chunks.len() as u64 != self.num_chunks {
            return Err(StreamError::IncompleteStream);
        }

        let mut out = Vec::with_capacity(self.total_size as usize);
        for index in 0..self.num_chunks {
            let chunk = chunks.get(&index).ok_or(StreamError::IncompleteStream)?;
            out.extend_from_slice(chunk);
        }
        out.truncate(self.total_size as usize);
        Ok(out)
    }

    pub fn missing_chunks(&self) -> Vec<u64> {
        let chunks = self.chunks.read();
        (0..self.num_chunks).filter(|i| !chunks.contains_key(i)).collect()
    }

    pub fn progress(&self) -> SessionProgress {
        let chunks = self.chunks.read();
        SessionProgress {
            received_chunks: chunks.len(),
            num_chunks: self.num_chunks as usize,
            bytes_received: chunks.values().map(|c| c.len() as u64).sum(),
        }
    }
}

/// Verifies a chunk's optional proof: `H(commitment || chunk_index || data)`.
pub fn verify_chunk(commitment: &[u8], chunk_index: u64, data: &[u8], proof: &[u8; 32]) -> Result<(), StreamError> {
    let mut hasher = Keccak256::new();
    hasher.update(commitment);
    hasher.update(chunk_index.to_le_bytes());
    hasher.update(data);
    let expected: [u8; 32] = hasher.finalize().into();

    if &expected != proof {
        return Err(StreamError::ChunkVerification);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reassembles_chunks_in_order_truncated_to_total_size() {
        let session = StreamSession::new(0, 3000, 2048);
        session.add_chunk(0, &[0xAAu8; 2048]).unwrap();
        session.add_chunk(1, &[0xBBu8; 2048]).unwrap();

        let assembled = session.assemble().unwrap();
        assert_eq!(assembled.len(), 3000);
        assert!(assembled[..2048].iter().all(|&b| b == 0xAA));
        assert!(assembled[2048..].iter().all(|&b| b == 0xBB));
    }

    #[test]
    fn rejects_out_of_range_chunk_index() {
        let session = StreamSession::new(0, 3000, 2048);
        assert_eq!(
            session.add_chunk(2, &[0u8; 10]),
            Err(StreamError::IndexOutOfRange(2, 2))
        );
    }

    #[test]
    fn rejects_duplicate_chunk() {
        let session = StreamSession::new(0, 3000, 2048);
        session.add_chunk(0, &[0xAAu8; 2048]).unwrap();
        assert_eq!(session.add_chunk(0, &[0xAAu8; 2048]), Err(StreamError::DuplicateChunk(0)));
    }

    #[test]
    fn assemble_fails_when_incomplete() {
        let session = StreamSession::new(0, 3000, 2048);
        session.add_chunk(0, &[0xAAu8; 2048]).unwrap();
        assert_eq!(session.assemble(), Err(StreamError::IncompleteStream));
    }

    #[test]
    fn missing_chunks_reports_sorted_unreceived_indices() {
        let session = StreamSession::new(0, 3000, 2048);
        session.add_chunk(1, &[0xBBu8; 952]).unwrap();
        assert_eq!(session.missing_chunks(), vec![0]);
    }

    #[test]
    fn cancelled_session_rejects_adds_and_assemble() {
        let session = StreamSession::new(0, 3000, 2048);
        session.cancel();
        assert_eq!(
            session.add_chunk(0, &[0xAAu8; 2048]),
            Err(StreamError::SessionCancelled)
        );
        assert_eq!(session.assemble(), Err(StreamError::SessionCancelled));
    }

    #[test]
    fn chunk_verification_detects_tampering() {
        let commitment = b"commitment-bytes";
        let data = b"chunk-data";
        let mut hasher = Keccak256::new();
        hasher.update(commitment);
        hasher.update(3u64.to_le_bytes());
        hasher.update(data);
        let proof: [u8; 32] = hasher.finalize().into();

        assert!(verify_chunk(commitment, 3, data, &proof).is_ok());
        assert_eq!(
            verify_chunk(commitment, 4, data, &proof),
            Err(StreamError::ChunkVerification)
        );
    }
}
