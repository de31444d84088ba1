//! Configurable blob-validation rule pipeline with an optional result
//! cache.

pub mod cache;
pub mod errors;
pub mod pipeline;
pub mod rules;

pub use cache::ValidationCache;
pub use errors::{RuleError, ValidatorError};
pub use pipeline::{ValidationPipeline, ValidationResult};
pub use rules::{BlobMeta, CommitmentRule, ExpiryRule, FormatRule, SizeRule, ValidationRule};
