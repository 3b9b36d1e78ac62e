//! Batch sampling configuration.
//!
//! [`SamplerConfig`] holds the parameters of a [`RosterSampler`](super::RosterSampler) run.

/// Configuration for sampling a batch of candidate rosters.
///
/// # Defaults
///
/// ```
/// use rosterizer::generation::SamplerConfig;
///
/// let config = SamplerConfig::default();
/// assert_eq!(config.batch_size, 10);
/// assert!(config.use_play_with);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use rosterizer::generation::SamplerConfig;
///
/// let config = SamplerConfig::default()
///     .with_batch_size(50)
///     .with_play_with(false)
///     .with_seed(7);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplerConfig {
    /// Number of candidate rosters to generate.
    pub batch_size: usize,

    /// Whether partner requests pull partners onto the same team.
    pub use_play_with: bool,

    /// Whether to generate on rayon worker threads.
    ///
    /// Only takes effect with the `parallel` feature. Output is the same
    /// either way for a given seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            use_play_with: true,
            parallel: true,
            seed: None,
        }
    }
}

impl SamplerConfig {
    /// Sets the number of rosters per batch.
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    /// Enables or disables partner propagation.
    pub fn with_play_with(mut self, enabled: bool) -> Self {
        self.use_play_with = enabled;
        self
    }

    /// Enables or disables parallel generation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".into());
        }
        Ok(())
    }
}
