//! Deterministic custody-group/column assignment from a node identifier,
//! with per-epoch rotation.

pub mod assignment;
pub mod errors;

pub use assignment::{
    CustodyAssignment, compute_assignment, compute_columns_for_custody_group,
    get_custody_groups, rotate_node_id,
};
pub use errors::CustodyError;
