//! Evaluation configuration.

/// Configuration for [`RosterEvaluator`](super::RosterEvaluator).
///
/// # Builder Pattern
///
/// ```
/// use rosterizer::evaluation::EvaluationConfig;
///
/// let config = EvaluationConfig::default()
///     .with_exempt_play_with_pairs(false)
///     .with_parallel(false);
/// assert!(!config.exempt_play_with_pairs);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationConfig {
    /// Whether a member whose requested partner is already counted on the
    /// same team is left out of the continuity overlap.
    ///
    /// With this on, a pair that asked to play together counts as one
    /// repeat rather than two.
    pub exempt_play_with_pairs: bool,

    /// Whether batch ranking scores candidates on rayon worker threads.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            exempt_play_with_pairs: true,
            parallel: true,
        }
    }
}

impl EvaluationConfig {
    /// Enables or disables the partner exemption in continuity scoring.
    pub fn with_exempt_play_with_pairs(mut self, exempt: bool) -> Self {
        self.exempt_play_with_pairs = exempt;
        self
    }

    /// Enables or disables parallel ranking.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
