use crate::{
    constants::{BYTES_PER_CELL, MAX_BLOB_COMMITMENTS_PER_BLOCK, NUMBER_OF_COLUMNS},
    errors::MatrixError,
};

/// A fixed 2048-byte cell: 64 consecutive field elements.
pub type Cell = [u8; BYTES_PER_CELL];

pub type ColumnIndex = u64;
pub type RowIndex = u64;

/// Opaque 48-byte KZG-style artifact. Verified by an external collaborator;
/// this core only moves the bytes around.
pub type KzgProof = [u8; 48];
pub type KzgCommitment = [u8; 48];

/// Opaque 32-byte node identifier, also used as a hashing input for custody
/// derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NodeId(pub [u8; 32]);

impl NodeId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for NodeId {
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

/// One point of the `MAX_BLOB_COMMITMENTS_PER_BLOCK x NUMBER_OF_COLUMNS`
/// extended matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixEntry {
    pub row_index: RowIndex,
    pub column_index: ColumnIndex,
    pub cell: Cell,
    pub proof: KzgProof,
}

/// The internal, per-column representation built by the column builder:
/// one cell (and opaque proof) per blob of the block, plus an internal
/// aggregate commitment used only for local caching/identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataColumn {
    pub index: ColumnIndex,
    pub cells: Vec<Cell>,
    pub proofs: Vec<KzgProof>,
    /// Domain-separated hash over the column's cells; not a KZG commitment.
    pub aggregate_commitment: [u8; 32],
}

/// The gossip/wire-level data column sidecar: a column index, one cell per
/// blob of the block, and the external KZG commitments/proofs for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataColumnSidecar {
    pub index: ColumnIndex,
    pub column: Vec<Cell>,
    pub kzg_commitments: Vec<KzgCommitment>,
    pub kzg_proofs: Vec<KzgProof>,
    /// Opaque Merkle inclusion proof; not interpreted by this core.
    pub kzg_commitments_inclusion_proof: Option<Vec<[u8; 32]>>,
}

impl DataColumnSidecar {
    pub fn compute_subnet(&self, subnet_count: u64) -> u64 {
        self.index % subnet_count
    }
}

/// Structural-only validation: lengths and bounds. Cryptographic
/// verification of the KZG commitments/proofs is delegated to an external
/// collaborator.
pub fn verify_data_column_sidecar(sidecar: &DataColumnSidecar) -> Result<(), MatrixError> {
    if sidecar.index >= NUMBER_OF_COLUMNS {
        return Err(MatrixError::InvalidSidecar(format!(
            "column index {} out of range [0, {NUMBER_OF_COLUMNS})",
            sidecar.index
        )));
    }

    if sidecar.column.len() != sidecar.kzg_commitments.len()
        || sidecar.column.len() != sidecar.kzg_proofs.len()
    {
        return Err(MatrixError::MismatchedLengths);
    }

    if sidecar.column.len() > MAX_BLOB_COMMITMENTS_PER_BLOCK {
        return Err(MatrixError::InvalidSidecar(format!(
            "column carries {} cells, exceeding MAX_BLOB_COMMITMENTS_PER_BLOCK ({MAX_BLOB_COMMITMENTS_PER_BLOCK})",
            sidecar.column.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidecar_with(index: ColumnIndex, count: usize) -> DataColumnSidecar {
        DataColumnSidecar {
            index,
            column: vec![[0u8; BYTES_PER_CELL]; count],
            kzg_commitments: vec![[0u8; 48]; count],
            kzg_proofs: vec![[0u8; 48]; count],
            kzg_commitments_inclusion_proof: None,
        }
    }

    #[test]
    fn rejects_out_of_range_column_index() {
        let sidecar = sidecar_with(NUMBER_OF_COLUMNS, 1);
        assert!(matches!(
            verify_data_column_sidecar(&sidecar),
            Err(MatrixError::InvalidSidecar(_))
        ));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let mut sidecar = sidecar_with(0, 2);
        sidecar.kzg_proofs.pop();
        assert_eq!(
            verify_data_column_sidecar(&sidecar),
            Err(MatrixError::MismatchedLengths)
        );
    }

    #[test]
    fn accepts_well_formed_sidecar() {
        let sidecar = sidecar_with(5, 3);
        assert!(verify_data_column_sidecar(&sidecar).is_ok());
    }

    #[test]
    fn compute_subnet_wraps_by_subnet_count() {
        let sidecar = sidecar_with(130, 1);
        assert_eq!(sidecar.compute_subnet(64), 2);
    }
}
