//! Batch verification of integrity signatures, fanned out across a bounded
//! worker pool. No implicit scheduler: the worker count is a configuration
//! option.

use crate::{
    errors::IntegrityError,
    signer::{IntegritySignature, IntegritySigner},
};

/// Upper bound on concurrent verification workers.
pub const MAX_BATCH_WORKERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchVerifyConfig {
    pub worker_count: usize,
}

impl Default for BatchVerifyConfig {
    fn default() -> Self {
        Self {
            worker_count: MAX_BATCH_WORKERS,
        }
    }
}

/// Verifies `(signature, commitment_digest)` pairs in parallel across up to
/// `config.worker_count` (clamped to [`MAX_BATCH_WORKERS`]) threads, each
/// processing a contiguous slice. Returns the count of pairs that verified
/// successfully plus one result per input, in input order.
pub fn verify_batch<S: IntegritySigner + Sync>(
    signer: &S,
    items: &[(IntegritySignature, [u8; 32])],
    config: BatchVerifyConfig,
) -> (usize, Vec<Result<bool, IntegrityError>>) {
    if items.is_empty() {
        return (0, Vec::new());
    }

    let worker_count = config.worker_count.clamp(1, MAX_BATCH_WORKERS).min(items.len());
    let chunk_size = items.len().div_ceil(worker_count);

    let results: Vec<Result<bool, IntegrityError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = items
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|(signature, commitment)| signer.verify_integrity(signature, *commitment))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles.into_iter().flat_map(|h| h.join().expect("worker panicked")).collect()
    });

    let valid_count = results.iter().filter(|r| matches!(r, Ok(true))).count();
    (valid_count, results)
}
