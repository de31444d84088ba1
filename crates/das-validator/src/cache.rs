//! Size-bounded, TTL-expiring cache of validation results, keyed by the
//! blob's Keccak-256 digest. A single mutex guards the whole
//! structure for the duration of any operation.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use sha3::{Digest, Keccak256};

use crate::pipeline::ValidationResult;

struct CacheEntry {
    result: ValidationResult,
    inserted_at: Instant,
}

struct Inner {
    entries: LruCache<[u8; 32], CacheEntry>,
    hits: u64,
    misses: u64,
}

pub struct ValidationCache {
    ttl: Duration,
    inner: Mutex<Inner>,
}

impl ValidationCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            ttl,
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn key_for(blob: &[u8]) -> [u8; 32] {
        Keccak256::digest(blob).into()
    }

    pub fn get(&self, blob: &[u8]) -> Option<ValidationResult> {
        let key = Self::key_for(blob);
        let mut inner = self.inner.lock();

        let expired = match inner.entries.peek(&key) {
            Some(entry) => entry.inserted_at.elapsed() > self.ttl,
            None => {
                inner.misses += 1;
                return None;
            }
        };

        if expired {
            inner.entries.pop(&key);
            inner.misses += 1;
            return None;
        }

        inner.hits += 1;
        inner.entries.get(&key).map(|entry| entry.result.clone())
    }

    pub fn put(&self, blob: &[u8], result: ValidationResult) {
        let key = Self::key_for(blob);
        let mut inner = self.inner.lock();
        inner.entries.put(
            key,
            CacheEntry {
                result,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn hits(&self) -> u64 {
        self.inner.lock().hits
    }

    pub fn misses(&self) -> u64 {
        self.inner.lock().misses
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_result() -> ValidationResult {
        ValidationResult {
            valid: true,
            errors: vec![],
            duration: Duration::from_secs(0),
        }
    }

    #[test]
    fn miss_then_hit_after_put() {
        let cache = ValidationCache::new(4, Duration::from_secs(60));
        let blob = vec![1u8; 8];
        assert!(cache.get(&blob).is_none());
        assert_eq!(cache.misses(), 1);

        cache.put(&blob, dummy_result());
        assert!(cache.get(&blob).is_some());
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn expired_entries_count_as_misses() {
        let cache = ValidationCache::new(4, Duration::from_nanos(1));
        let blob = vec![2u8; 8];
        cache.put(&blob, dummy_result());
        std::thread::sleep(Duration::from_millis(2));
        assert!(cache.get(&blob).is_none());
    }

    #[test]
    fn evicts_oldest_entry_when_full() {
        let cache = ValidationCache::new(2, Duration::from_secs(60));
        cache.put(&[1u8], dummy_result());
        cache.put(&[2u8], dummy_result());
        cache.put(&[3u8], dummy_result());
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&[1u8]).is_none());
    }
}
