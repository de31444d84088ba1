//! Protocol constants fixed by the PeerDAS design.

pub use das_field::{BYTES_PER_CELL, BYTES_PER_FIELD_ELEMENT, FIELD_ELEMENTS_PER_CELL};

pub const FIELD_ELEMENTS_PER_BLOB: usize = 4096;
pub const BYTES_PER_BLOB: usize = FIELD_ELEMENTS_PER_BLOB * BYTES_PER_FIELD_ELEMENT;

/// Cells in the extended (2x replicated) blob matrix.
pub const CELLS_PER_EXT_BLOB: usize = 128;
/// Minimum number of distinct cells required to reconstruct a blob (50%).
pub const RECONSTRUCTION_THRESHOLD: usize = CELLS_PER_EXT_BLOB / 2;

pub const NUMBER_OF_COLUMNS: u64 = 128;
pub const NUMBER_OF_CUSTODY_GROUPS: u64 = 128;
pub const CUSTODY_REQUIREMENT: u64 = 4;
pub const SAMPLES_PER_SLOT: u64 = 8;

pub const DATA_COLUMN_SIDECAR_SUBNET_COUNT: u64 = 64;
pub const MAX_BLOB_COMMITMENTS_PER_BLOCK: usize = 9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_size_is_128_kib() {
        assert_eq!(BYTES_PER_BLOB, 128 * 1024);
    }

    #[test]
    fn reconstruction_threshold_is_half_the_extended_matrix() {
        assert_eq!(RECONSTRUCTION_THRESHOLD, 64);
        assert_eq!(CELLS_PER_EXT_BLOB, 128);
    }
}
