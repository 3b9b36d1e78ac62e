//! Committing rosters to storage.
//!
//! [`TeamApplier`] converts the chosen [`Assignment`](crate::model::Assignment)
//! into [`PersistedTeam`](crate::model::PersistedTeam) records and writes
//! them through a [`TeamStore`] in a single all-or-nothing call.
//! [`InMemoryRecords`] implements both sides of the storage boundary.

mod applier;
mod store;

pub use applier::{CommittedRoster, TeamApplier};
pub use store::{InMemoryRecords, TeamStore};
