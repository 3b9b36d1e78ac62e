//! Multi-factor roster scoring.
//!
//! A candidate assignment is scored on four independent axes and the
//! results are multiplied into one composite in `[0, 1]`:
//!
//! - **Completeness**: how many entries were left on the bench
//! - **Team fullness**: whether any team is short-handed
//! - **Position fit**: how well slots match stated preferences
//! - **Continuity**: how much each team repeats a team from one, two and
//!   three sessions back, with older sessions weighing less
//!
//! # Key Types
//!
//! - [`RosterEvaluator`]: scores and ranks assignments
//! - [`EvaluationContext`]: a session's entries and recent history, loaded once
//! - [`ScoreBreakdown`]: sub-scores, per-team continuity, composite
//!
//! The score tables themselves live in [`scores`].

mod config;
mod evaluator;
pub mod scores;

pub use config::EvaluationConfig;
pub use evaluator::{EvaluationContext, RankedRoster, RosterEvaluator, ScoreBreakdown};
