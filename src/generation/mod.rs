//! Candidate roster generation.
//!
//! A session's eligibility entries are placed into `floor(n / 4)` teams by
//! constrained greedy placement: each slot is filled by a random entry
//! whose first (else second) preference is that position. Partner
//! requests can pull a partner onto the same team at one of the partner's
//! own preferences. Entries that do not fit form the bench.
//!
//! # Key Types
//!
//! - [`RosterGenerator`]: one placement run over a borrowed pool
//! - [`RosterSampler`]: a batch of independent runs
//! - [`SamplerConfig`]: batch size, partner propagation, parallelism, seed
//! - [`Generation`]: an [`Assignment`](crate::model::Assignment) plus
//!   leftover entries and [`Diagnostic`]s
//!
//! Nothing here returns an error: slots without a candidate and partners
//! without an open slot are reported as diagnostics.

mod config;
mod generator;
mod sampler;
mod types;

pub use config::SamplerConfig;
pub use generator::{generate_single, RosterGenerator};
pub use sampler::{generate_batch, RosterSampler};
pub use types::{Diagnostic, Generation};
