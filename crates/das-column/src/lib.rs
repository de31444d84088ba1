//! Column builder: splits blobs into per-column cells, shapes gossip
//! messages, and deduplicates them.

pub mod builder;
pub mod errors;
pub mod gossip;

pub use builder::{aggregate_commitment, build_all_columns, build_column, build_columns, extract_cell, placeholder_proof};
pub use errors::ColumnError;
pub use gossip::{ColumnGossipMessage, DedupCache, MAX_DEDUP, validate_gossip_message};
