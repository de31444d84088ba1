//! Per-instance bookkeeping counters for a `SampleReconstructor`.
//!
//! Unlike the teacher's node-wide `lazy_static!` Prometheus registry, a
//! `SampleReconstructor` may be embedded many times in one process, so
//! each instance owns its own unregistered `prometheus` metric objects;
//! a host that wants to export them registers them itself.

use prometheus_exporter::prometheus::{Counter, Histogram, HistogramOpts};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconstructorMetricsSnapshot {
    pub blobs_complete: u64,
    pub blobs_failed: u64,
    pub duplicate_samples: u64,
    pub reconstruction_count: u64,
    pub reconstruction_total_seconds: f64,
}

pub struct ReconstructorMetrics {
    blobs_complete: Counter,
    blobs_failed: Counter,
    duplicate_samples: Counter,
    reconstruction_ns: Histogram,
}

impl ReconstructorMetrics {
    pub fn new() -> Self {
        Self {
            blobs_complete: Counter::new(
                "das_ingest_blobs_complete",
                "Number of blobs successfully reconstructed",
            )
            .expect("valid metric"),
            blobs_failed: Counter::new(
                "das_ingest_blobs_failed",
                "Number of blob reconstruction attempts that failed",
            )
            .expect("valid metric"),
            duplicate_samples: Counter::new(
                "das_ingest_duplicate_samples",
                "Number of duplicate (blob_index, cell_index) samples observed",
            )
            .expect("valid metric"),
            reconstruction_ns: Histogram::with_opts(HistogramOpts::new(
                "das_ingest_reconstruction_nanoseconds",
                "Wall-clock duration of a reconstruction attempt, in nanoseconds",
            ))
            .expect("valid metric"),
        }
    }

    pub fn record_duplicate(&self) {
        self.duplicate_samples.inc();
    }

    pub fn record_success(&self, duration_ns: f64) {
        self.blobs_complete.inc();
        self.reconstruction_ns.observe(duration_ns);
    }

    pub fn record_failure(&self, duration_ns: f64) {
        self.blobs_failed.inc();
        self.reconstruction_ns.observe(duration_ns);
    }

    pub fn snapshot(&self) -> ReconstructorMetricsSnapshot {
        ReconstructorMetricsSnapshot {
            blobs_complete: self.blobs_complete.get() as u64,
            blobs_failed: self.blobs_failed.get() as u64,
            duplicate_samples: self.duplicate_samples.get() as u64,
            reconstruction_count: self.reconstruction_ns.get_sample_count(),
            reconstruction_total_seconds: self.reconstruction_ns.get_sample_sum() / 1e9,
        }
    }
}

impl Default for ReconstructorMetrics {
    fn default() -> Self {
        Self::new()
    }
}
