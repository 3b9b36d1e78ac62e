//! Batch sampling of independent candidate rosters.

use super::config::SamplerConfig;
use super::generator::RosterGenerator;
use super::types::Generation;
use crate::error::{Result, RosterError};
use crate::model::EligibilityEntry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

/// Runs the generator repeatedly over the same pool.
///
/// Each run draws from its own generator seeded from the caller's, and
/// keeps its own remaining-pool state, so runs are independent and the
/// batch is the same whether it is produced sequentially or on rayon
/// worker threads.
///
/// # Usage
///
/// ```ignore
/// let config = SamplerConfig::default().with_batch_size(20).with_seed(42);
/// let batch = RosterSampler::run(&entries, &config)?;
/// ```
pub struct RosterSampler;

impl RosterSampler {
    /// Samples `config.batch_size` rosters.
    ///
    /// # Errors
    /// [`RosterError::InvalidConfig`] if the config fails validation.
    pub fn run(pool: &[EligibilityEntry], config: &SamplerConfig) -> Result<Vec<Generation>> {
        config.validate().map_err(RosterError::InvalidConfig)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        Ok(Self::sample(
            pool,
            config.batch_size,
            config.use_play_with,
            config.parallel,
            &mut rng,
        ))
    }

    /// Samples `count` rosters, seeding each run from `rng`.
    pub fn sample<R: Rng>(
        pool: &[EligibilityEntry],
        count: usize,
        use_play_with: bool,
        parallel: bool,
        rng: &mut R,
    ) -> Vec<Generation> {
        debug!(count, entries = pool.len(), use_play_with, "sampling candidate rosters");

        let seeds: Vec<u64> = (0..count).map(|_| rng.random()).collect();
        let generator = RosterGenerator::new(pool);
        let run = |seed: u64| {
            let mut run_rng = StdRng::seed_from_u64(seed);
            generator.generate(use_play_with, &mut run_rng)
        };

        #[cfg(feature = "parallel")]
        if parallel {
            return seeds.par_iter().map(|&seed| run(seed)).collect();
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        seeds.into_iter().map(run).collect()
    }
}

/// Generates `count` independent candidate assignments from `pool`.
pub fn generate_batch<R: Rng>(
    pool: &[EligibilityEntry],
    count: usize,
    use_play_with: bool,
    rng: &mut R,
) -> Vec<Generation> {
    RosterSampler::sample(pool, count, use_play_with, false, rng)
}
