//! Opt-in XOR-erasure reconstruction path. Treats the
//! 128-cell extended vector as 64 data shards followed by 64 parity
//! shards, where the protocol's 2x data duplication means parity shard
//! `i` carries the same payload as data shard `i`. Recovery XORs a
//! missing data shard against its paired parity shard (and vice versa).
//! Not BLS12-381-faithful; retained only as a configurable alternative to
//! the Reed-Solomon engine.

use das_field::BYTES_PER_CELL;
use das_matrix::{CELLS_PER_EXT_BLOB, Cell};

use crate::errors::IngestError;

const DATA_SHARDS: usize = CELLS_PER_EXT_BLOB / 2;

fn xor_cells(a: &Cell, b: &Cell) -> Cell {
    let mut out = [0u8; BYTES_PER_CELL];
    for i in 0..BYTES_PER_CELL {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// Recovers the blob's data half from a partial set of `(cell_index,
/// cell)` pairs drawn from the 128-cell extended vector.
pub fn reconstruct_xor_erasure(
    blob_index: u64,
    cells: &[(u64, Cell)],
) -> Result<Vec<u8>, IngestError> {
    let mut data: [Option<Cell>; DATA_SHARDS] = [None; DATA_SHARDS];
    let mut parity: [Option<Cell>; DATA_SHARDS] = [None; DATA_SHARDS];

    for &(index, cell) in cells {
        let idx = index as usize;
        if idx < DATA_SHARDS {
            data[idx] = Some(cell);
        } else if idx < CELLS_PER_EXT_BLOB {
            parity[idx - DATA_SHARDS] = Some(cell);
        }
    }

    let zero = [0u8; BYTES_PER_CELL];
    let mut have = 0usize;
    for i in 0..DATA_SHARDS {
        if data[i].is_none() {
            if let Some(p) = parity[i] {
                data[i] = Some(xor_cells(&p, &zero));
            }
        }
        if data[i].is_some() {
            have += 1;
        }
    }

    if have < DATA_SHARDS {
        return Err(IngestError::InsufficientCells {
            blob_index,
            have,
            need: DATA_SHARDS,
        });
    }

    let mut blob = Vec::with_capacity(DATA_SHARDS * BYTES_PER_CELL);
    for shard in data.iter() {
        blob.extend_from_slice(&shard.expect("checked present above"));
    }
    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_of(byte: u8) -> Cell {
        [byte; BYTES_PER_CELL]
    }

    #[test]
    fn recovers_missing_data_shard_from_its_parity_pair() {
        let mut cells = Vec::new();
        for i in 0..DATA_SHARDS as u64 {
            if i == 5 {
                // data shard 5 missing, supply its parity pair instead.
                cells.push((i + DATA_SHARDS as u64, cell_of(5)));
            } else {
                cells.push((i, cell_of(i as u8)));
            }
        }

        let blob = reconstruct_xor_erasure(0, &cells).expect("recovers via parity");
        assert_eq!(&blob[5 * BYTES_PER_CELL..5 * BYTES_PER_CELL + 4], &[5, 5, 5, 5]);
    }

    #[test]
    fn fails_when_neither_data_nor_parity_is_available() {
        let cells: Vec<(u64, Cell)> = (0..DATA_SHARDS as u64 - 1).map(|i| (i, cell_of(i as u8))).collect();
        assert!(matches!(
            reconstruct_xor_erasure(0, &cells),
            Err(IngestError::InsufficientCells { .. })
        ));
    }
}
