//! League roster generation and scoring.
//!
//! Places a session's registered participants into four-player teams
//! (Skip, Vice, Second, Lead) and ranks competing placements:
//!
//! - **Generation**: Constrained greedy placement honoring first and
//!   second position preferences and partner ("play with") requests,
//!   with an injected random source for the choice among candidates.
//! - **Sampling**: Batches of independent placements over the same pool,
//!   optionally on rayon worker threads.
//! - **Evaluation**: Completeness, team fullness, position fit and
//!   cross-session continuity, combined into one composite score.
//! - **History**: Chronological lookup of earlier sessions over
//!   `(year, number)`.
//! - **Apply**: Atomic commit of the chosen placement as persisted teams.
//!
//! # Architecture
//!
//! The crate is the algorithmic core of a league tool. Roster import,
//! session management and presentation live in collaborators that reach
//! it through [`SessionRecords`] and [`TeamStore`]. Nothing here performs
//! I/O of its own.
//!
//! ```ignore
//! let entries = records.entries(session)?;
//! let batch = RosterSampler::run(&entries, &SamplerConfig::default().with_seed(7))?;
//! let assignments: Vec<_> = batch.into_iter().map(|g| g.assignment).collect();
//! let best = RosterEvaluator::default().select_best(&records, session, &assignments)?;
//! if let Some(best) = best {
//!     TeamApplier::commit(&mut records, session, &assignments[best.index])?;
//! }
//! ```

pub mod apply;
pub mod error;
pub mod evaluation;
pub mod generation;
pub mod history;
pub mod model;

pub use apply::{InMemoryRecords, TeamApplier, TeamStore};
pub use error::{Result, RosterError};
pub use evaluation::{RosterEvaluator, ScoreBreakdown};
pub use generation::{generate_batch, generate_single, Generation, RosterGenerator, RosterSampler};
pub use history::{previous_session, SessionRecords, SessionTimeline};
