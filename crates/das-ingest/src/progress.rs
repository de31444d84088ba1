use std::collections::BTreeMap;

use das_field::BYTES_PER_CELL;
use das_matrix::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobState {
    Empty,
    Partial,
    Ready,
    Complete,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct BlobProgress {
    pub cells: BTreeMap<u64, Cell>,
    pub cached_result: Option<Vec<u8>>,
    pub state: BlobState,
    pub duplicate_count: u64,
}

impl Default for BlobState {
    fn default() -> Self {
        BlobState::Empty
    }
}

impl BlobProgress {
    pub fn recompute_state(&mut self, threshold: usize) {
        if self.cached_result.is_some() {
            self.state = BlobState::Complete;
        } else if self.cells.len() >= threshold {
            self.state = BlobState::Ready;
        } else if self.cells.is_empty() {
            self.state = BlobState::Empty;
        } else {
            self.state = BlobState::Partial;
        }
    }

    pub fn cell_indices(&self) -> Vec<u64> {
        self.cells.keys().copied().collect()
    }

    pub fn cell_data(&self) -> Vec<Cell> {
        self.cells.values().copied().collect()
    }

    pub fn as_indexed_pairs(&self) -> Vec<(u64, Cell)> {
        self.cells.iter().map(|(&idx, &cell)| (idx, cell)).collect()
    }
}

pub fn pad_or_truncate(data: &[u8]) -> Cell {
    let mut cell = [0u8; BYTES_PER_CELL];
    let len = data.len().min(BYTES_PER_CELL);
    cell[..len].copy_from_slice(&data[..len]);
    cell
}
