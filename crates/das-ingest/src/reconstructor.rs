//! Accumulates out-of-order cell samples per blob, deduplicates them, and
//! triggers reconstruction once the threshold is reached.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use das_matrix::CELLS_PER_EXT_BLOB;
use das_reconstruct::reconstruct_blob;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{
    config::{IngestConfig, ReconstructionMode},
    errors::IngestError,
    metrics::{ReconstructorMetrics, ReconstructorMetricsSnapshot},
    progress::{BlobProgress, BlobState, pad_or_truncate},
    xor::reconstruct_xor_erasure,
};

pub struct SampleReconstructor {
    config: IngestConfig,
    blobs: RwLock<HashMap<u64, BlobProgress>>,
    closed: AtomicBool,
    metrics: ReconstructorMetrics,
}

impl SampleReconstructor {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            blobs: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
            metrics: ReconstructorMetrics::new(),
        }
    }

    fn ensure_open(&self) -> Result<(), IngestError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(IngestError::ReconstructorClosed);
        }
        Ok(())
    }

    /// Records one cell sample. Out-of-bounds indices are rejected;
    /// duplicates of an already-seen `(blob_index, cell_index)` succeed
    /// with a metric increment rather than an error. `data` is truncated
    /// or zero-padded to `BYTES_PER_CELL`.
    pub fn add_sample(&self, blob_index: u64, cell_index: u64, data: &[u8]) -> Result<(), IngestError> {
        self.ensure_open()?;

        if cell_index >= CELLS_PER_EXT_BLOB as u64 {
            return Err(IngestError::IndexOutOfRange(cell_index));
        }

        let cell = pad_or_truncate(data);
        let mut blobs = self.blobs.write();
        let progress = blobs.entry(blob_index).or_default();

        if progress.cells.contains_key(&cell_index) {
            progress.duplicate_count += 1;
            self.metrics.record_duplicate();
            return Ok(());
        }

        progress.cells.insert(cell_index, cell);
        progress.recompute_state(self.config.reconstruction_threshold);
        Ok(())
    }

    /// True when the blob already has a cached result, or has enough
    /// unique cells to attempt reconstruction.
    pub fn can_reconstruct(&self, blob_index: u64) -> bool {
        let blobs = self.blobs.read();
        match blobs.get(&blob_index) {
            Some(progress) => {
                progress.cached_result.is_some()
                    || progress.cells.len() >= self.config.reconstruction_threshold
            }
            None => false,
        }
    }

    /// Snapshots the blob's cells under the lock, releases it, runs the
    /// reconstruction engine, then re-acquires the lock to cache the
    /// result and update state/metrics.
    pub fn reconstruct(&self, blob_index: u64) -> Result<Vec<u8>, IngestError> {
        self.ensure_open()?;

        let (indices, cells, indexed_pairs) = {
            let blobs = self.blobs.read();
            let Some(progress) = blobs.get(&blob_index) else {
                return Err(IngestError::InsufficientCells {
                    blob_index,
                    have: 0,
                    need: self.config.reconstruction_threshold,
                });
            };

            if let Some(cached) = &progress.cached_result {
                return Ok(cached.clone());
            }

            (
                progress.cell_indices(),
                progress.cell_data(),
                progress.as_indexed_pairs(),
            )
        };

        if indices.len() < self.config.reconstruction_threshold {
            return Err(IngestError::InsufficientCells {
                blob_index,
                have: indices.len(),
                need: self.config.reconstruction_threshold,
            });
        }

        let start = Instant::now();
        let result = match self.config.reconstruction_mode {
            ReconstructionMode::ReedSolomon => {
                reconstruct_blob(&cells, &indices).map_err(IngestError::from)
            }
            ReconstructionMode::XorErasure => reconstruct_xor_erasure(blob_index, &indexed_pairs),
        };
        let elapsed_ns = start.elapsed().as_nanos() as f64;

        let mut blobs = self.blobs.write();
        let progress = blobs.entry(blob_index).or_default();
        match result {
            Ok(blob) => {
                progress.cached_result = Some(blob.clone());
                progress.state = BlobState::Complete;
                self.metrics.record_success(elapsed_ns);
                debug!(blob_index, "blob reconstruction succeeded");
                Ok(blob)
            }
            Err(err) => {
                progress.state = BlobState::Failed;
                self.metrics.record_failure(elapsed_ns);
                warn!(blob_index, %err, "blob reconstruction failed");
                Err(err)
            }
        }
    }

    pub fn state_of(&self, blob_index: u64) -> BlobState {
        self.blobs
            .read()
            .get(&blob_index)
            .map(|p| p.state)
            .unwrap_or(BlobState::Empty)
    }

    pub fn metrics(&self) -> ReconstructorMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Sticky close: all subsequent writes/reconstructs fail.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Returns the reconstructor to a fresh state without reallocating
    /// the underlying map.
    pub fn reset(&self) {
        self.closed.store(false, Ordering::Release);
        self.blobs.write().clear();
    }
}
