//! Per-node column custody manager: epoch-scoped assignment, expiring
//! column storage with capacity eviction, and sample-column selection.

pub mod errors;
pub mod manager;
pub mod types;

pub use errors::CustodyMgrError;
pub use manager::{CustodyMgrConfig, CustodyManager, SAMPLES_PER_SLOT};
pub use types::{ColumnKey, RotationHistory, StoredColumn};
