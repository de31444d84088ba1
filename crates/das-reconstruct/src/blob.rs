//! Blob-level reconstruction: recovering the original 4096 field elements
//! of a blob from a subset of its 128 extended cells.

use std::collections::HashMap;

use das_field::{BYTES_PER_CELL, FieldElement, cell_to_field_elements, field_elements_to_bytes};
use das_matrix::{BYTES_PER_BLOB, CELLS_PER_EXT_BLOB, Cell, KzgProof, RECONSTRUCTION_THRESHOLD};

use crate::{errors::ReconstructError, lagrange::BarycentricWeights};

const DATA_CELLS_PER_BLOB: usize = CELLS_PER_EXT_BLOB / 2;
const FIELD_ELEMENTS_PER_CELL: usize = 64;

fn validate_inputs(cells: &[Cell], indices: &[u64]) -> Result<(), ReconstructError> {
    if cells.len() != indices.len() {
        return Err(ReconstructError::InsufficientCells {
            got: cells.len().min(indices.len()),
            needed: RECONSTRUCTION_THRESHOLD,
        });
    }

    let mut seen = HashMap::with_capacity(indices.len());
    for &index in indices {
        if index >= CELLS_PER_EXT_BLOB as u64 {
            return Err(ReconstructError::InvalidCellIndex(index));
        }
        if seen.insert(index, ()).is_some() {
            return Err(ReconstructError::DuplicateCellIndex(index));
        }
    }

    if indices.len() < RECONSTRUCTION_THRESHOLD {
        return Err(ReconstructError::InsufficientCells {
            got: indices.len(),
            needed: RECONSTRUCTION_THRESHOLD,
        });
    }

    Ok(())
}

/// Recovers the original blob's 4096 field elements (128 KiB) from at
/// least `RECONSTRUCTION_THRESHOLD` cells of the extended blob.
pub fn reconstruct_blob(cells: &[Cell], indices: &[u64]) -> Result<Vec<u8>, ReconstructError> {
    validate_inputs(cells, indices)?;

    let xs: Vec<FieldElement> = indices.iter().map(|&i| FieldElement::from_u64(i)).collect();
    let weights = BarycentricWeights::new(&xs)?;
    let decoded: Vec<[FieldElement; FIELD_ELEMENTS_PER_CELL]> =
        cells.iter().map(cell_to_field_elements).collect();

    let mut flat = Vec::with_capacity(DATA_CELLS_PER_BLOB * FIELD_ELEMENTS_PER_CELL);
    for target_cell in 0..DATA_CELLS_PER_BLOB {
        let target = FieldElement::from_u64(target_cell as u64);
        for fe_pos in 0..FIELD_ELEMENTS_PER_CELL {
            let ys: Vec<FieldElement> = decoded.iter().map(|cell| cell[fe_pos]).collect();
            flat.push(weights.evaluate(&ys, target)?);
        }
    }

    Ok(field_elements_to_bytes(&flat, BYTES_PER_BLOB))
}

/// Recovers all 128 cells of the extended blob, filling in only the
/// missing ones. Proofs are zero-filled placeholders: real proofs require
/// the commitment and are produced by the external KZG collaborator.
pub fn recover_cells_and_proofs(
    cells: &[Cell],
    indices: &[u64],
) -> Result<(Vec<Cell>, Vec<KzgProof>), ReconstructError> {
    validate_inputs(cells, indices)?;

    let known: HashMap<u64, &Cell> = indices.iter().copied().zip(cells.iter()).collect();

    let xs: Vec<FieldElement> = indices.iter().map(|&i| FieldElement::from_u64(i)).collect();
    let weights = BarycentricWeights::new(&xs)?;
    let decoded: Vec<[FieldElement; FIELD_ELEMENTS_PER_CELL]> =
        cells.iter().map(cell_to_field_elements).collect();

    let mut full_cells = Vec::with_capacity(CELLS_PER_EXT_BLOB);
    for cell_index in 0..CELLS_PER_EXT_BLOB as u64 {
        if let Some(&cell) = known.get(&cell_index) {
            full_cells.push(*cell);
            continue;
        }

        let target = FieldElement::from_u64(cell_index);
        let mut elems = Vec::with_capacity(FIELD_ELEMENTS_PER_CELL);
        for fe_pos in 0..FIELD_ELEMENTS_PER_CELL {
            let ys: Vec<FieldElement> = decoded.iter().map(|cell| cell[fe_pos]).collect();
            elems.push(weights.evaluate(&ys, target)?);
        }

        let bytes = field_elements_to_bytes(&elems, BYTES_PER_CELL);
        let mut cell_bytes = [0u8; BYTES_PER_CELL];
        cell_bytes.copy_from_slice(&bytes);
        full_cells.push(cell_bytes);
    }

    let proofs = vec![[0u8; 48]; CELLS_PER_EXT_BLOB];
    Ok((full_cells, proofs))
}
