//! Runs a sequence of rules and accumulates every violation instead of
//! bailing out on the first one.

use std::time::Instant;

use crate::errors::RuleError;
use crate::rules::{BlobMeta, ValidationRule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<RuleError>,
    pub duration: std::time::Duration,
}

#[derive(Default)]
pub struct ValidationPipeline {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn validate(&self, blob: &[u8], meta: &BlobMeta) -> ValidationResult {
        let start = Instant::now();
        let mut errors = Vec::new();

        for rule in &self.rules {
            if let Err(kind) = rule.check(blob, meta) {
                errors.push(RuleError {
                    rule: rule.name().to_string(),
                    kind,
                });
            }
        }

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            duration: start.elapsed(),
        }
    }
}
