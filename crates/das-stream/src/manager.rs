//! Enforces concurrency, per-blob, and size limits across streaming
//! sessions, and sweeps expired ones.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use das_matrix::BYTES_PER_BLOB;
use parking_lot::RwLock;
use tracing::debug;

use crate::{errors::StreamError, session::StreamSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamManagerConfig {
    pub max_concurrent_streams: usize,
    pub max_blob_size: u64,
    pub stream_timeout: Duration,
}

impl Default for StreamManagerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_streams: 64,
            max_blob_size: BYTES_PER_BLOB as u64,
            stream_timeout: Duration::from_secs(60),
        }
    }
}

pub struct StreamSessionManager {
    config: StreamManagerConfig,
    sessions: RwLock<HashMap<u64, Arc<StreamSession>>>,
}

impl StreamSessionManager {
    pub fn new(config: StreamManagerConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a new session for `blob_index`. Fails if the manager is at
    /// `max_concurrent_streams`, a session for this blob already exists,
    /// or `total_size` exceeds `max_blob_size`.
    pub fn create_session(
        &self,
        blob_index: u64,
        total_size: u64,
        chunk_size: u64,
    ) -> Result<Arc<StreamSession>, StreamError> {
        if total_size > self.config.max_blob_size {
            return Err(StreamError::BlobTooLarge(total_size, self.config.max_blob_size));
        }

        let mut sessions = self.sessions.write();
        if sessions.len() >= self.config.max_concurrent_streams {
            return Err(StreamError::MaxSessionsReached);
        }
        if sessions.contains_key(&blob_index) {
            return Err(StreamError::DuplicateSession(blob_index));
        }

        let session = Arc::new(StreamSession::new(blob_index, total_size, chunk_size));
        sessions.insert(blob_index, session.clone());
        Ok(session)
    }

    pub fn get_session(&self, blob_index: u64) -> Option<Arc<StreamSession>> {
        self.sessions.read().get(&blob_index).cloned()
    }

    pub fn remove_session(&self, blob_index: u64) -> Option<Arc<StreamSession>> {
        self.sessions.write().remove(&blob_index)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Cancels and drops any session older than `stream_timeout`,
    /// returning the blob indices swept.
    pub fn cleanup_expired(&self) -> Vec<u64> {
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        let expired: Vec<u64> = sessions
            .iter()
            .filter(|(_, session)| now.duration_since(session.created_at) >= self.config.stream_timeout)
            .map(|(&blob_index, _)| blob_index)
            .collect();

        for blob_index in &expired {
            if let Some(session) = sessions.remove(blob_index) {
                session.cancel();
                debug!(blob_index, "stream session expired and was removed");
            }
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_oversized_blob() {
        let manager = StreamSessionManager::new(StreamManagerConfig {
            max_blob_size: 100,
            ..StreamManagerConfig::default()
        });
        assert_eq!(
            manager.create_session(0, 200, 50),
            Err(StreamError::BlobTooLarge(200, 100))
        );
    }

    #[test]
    fn rejects_duplicate_session_for_same_blob() {
        let manager = StreamSessionManager::new(StreamManagerConfig::default());
        manager.create_session(0, 100, 50).unwrap();
        assert_eq!(
            manager.create_session(0, 100, 50),
            Err(StreamError::DuplicateSession(0))
        );
    }

    #[test]
    fn rejects_beyond_max_concurrent_streams() {
        let manager = StreamSessionManager::new(StreamManagerConfig {
            max_concurrent_streams: 1,
            ..StreamManagerConfig::default()
        });
        manager.create_session(0, 100, 50).unwrap();
        assert_eq!(manager.create_session(1, 100, 50), Err(StreamError::MaxSessionsReached));
    }

    #[test]
    fn cleanup_expired_removes_and_cancels_stale_sessions() {
        let manager = StreamSessionManager::new(StreamManagerConfig {
            stream_timeout: Duration::from_millis(0),
            ..StreamManagerConfig::default()
        });
        let session = manager.create_session(0, 100, 50).unwrap();
        std::thread::sleep(Duration::from_millis(5));

        let expired = manager.cleanup_expired();
        assert_eq!(expired, vec![0]);
        assert!(session.is_cancelled());
        assert_eq!(manager.session_count(), 0);
    }
}
