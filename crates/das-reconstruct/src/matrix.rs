//! Row-wise (per-blob) reconstruction across an entire block's extended
//! matrix of `MatrixEntry` points.

use std::collections::HashMap;

use das_matrix::MatrixEntry;
use tracing::warn;

use crate::{blob::reconstruct_blob, errors::ReconstructError};

/// Groups `entries` by `row_index` and reconstructs each blob row
/// independently. `blob_count` is the number of rows expected (the
/// block's blob count); any row with fewer than the reconstruction
/// threshold of cells fails with `InsufficientCells`.
pub fn recover_matrix(
    entries: &[MatrixEntry],
    blob_count: usize,
) -> Result<Vec<Vec<u8>>, ReconstructError> {
    let mut by_row: HashMap<u64, Vec<&MatrixEntry>> = HashMap::new();
    for entry in entries {
        by_row.entry(entry.row_index).or_default().push(entry);
    }

    let mut blobs = Vec::with_capacity(blob_count);
    for row in 0..blob_count as u64 {
        let row_entries = by_row.get(&row).map(Vec::as_slice).unwrap_or(&[]);
        let cells: Vec<_> = row_entries.iter().map(|e| e.cell).collect();
        let indices: Vec<u64> = row_entries.iter().map(|e| e.column_index).collect();
        let blob = reconstruct_blob(&cells, &indices).inspect_err(|err| {
            warn!(row, cells = cells.len(), %err, "row reconstruction failed");
        })?;
        blobs.push(blob);
    }

    Ok(blobs)
}
