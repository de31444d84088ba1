use das_matrix::RECONSTRUCTION_THRESHOLD;

/// Selects the reconstruction algorithm used once a blob crosses
/// threshold. This is a configuration choice made at construction time,
/// never a silent runtime fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconstructionMode {
    /// Lagrange-interpolation recovery over the BLS12-381 scalar field.
    #[default]
    ReedSolomon,
    /// Treats the 128-cell vector as 64 data + 64 parity shards and
    /// recovers missing data shards by XOR against their paired parity
    /// shard. Not BLS12-381-faithful; intended for environments where
    /// full Reed-Solomon recovery is unnecessary overhead.
    XorErasure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestConfig {
    pub reconstruction_mode: ReconstructionMode,
    pub reconstruction_threshold: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            reconstruction_mode: ReconstructionMode::default(),
            reconstruction_threshold: RECONSTRUCTION_THRESHOLD,
        }
    }
}
