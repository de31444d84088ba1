use das_matrix::ColumnIndex;

/// A custodied column's payload plus its retention window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredColumn {
    pub index: ColumnIndex,
    pub epoch: u64,
    pub slot: u64,
    pub data: Vec<u8>,
    pub stored_at: u64,
    pub expires_at: u64,
}

/// `(epoch, column_index)` key for the stored-column map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey {
    pub epoch: u64,
    pub column_index: ColumnIndex,
}

impl ColumnKey {
    pub fn new(epoch: u64, column_index: ColumnIndex) -> Self {
        Self { epoch, column_index }
    }
}

/// Snapshot of the most recent epoch rotation: the prior epoch's columns,
/// the current epoch's columns, when the rotation happened, and whether
/// any prior-epoch columns are still awaiting migration/eviction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationHistory {
    pub previous_epoch: Option<u64>,
    pub previous_columns: Vec<ColumnIndex>,
    pub current_epoch: u64,
    pub current_columns: Vec<ColumnIndex>,
    pub rotated_at: u64,
    pub pending_migration: bool,
}
