//! Read boundary to the storage collaborator.

use crate::error::Result;
use crate::model::{EligibilityEntry, PersistedTeam, SessionId};

/// Read access to league records.
///
/// Implemented by whatever owns persistence (a database layer, an import
/// cache, or [`InMemoryRecords`](crate::apply::InMemoryRecords)). The core
/// only reads through this trait; writes go through
/// [`TeamStore`](crate::apply::TeamStore).
pub trait SessionRecords {
    /// Every known session, in any order.
    fn sessions(&self) -> Result<Vec<SessionId>>;

    /// Eligibility entries registered for `session`.
    ///
    /// # Errors
    /// [`RosterError::SessionNotFound`](crate::RosterError::SessionNotFound)
    /// if the session is unknown.
    fn entries(&self, session: SessionId) -> Result<Vec<EligibilityEntry>>;

    /// Teams committed for `session`. Empty when none have been committed.
    fn teams(&self, session: SessionId) -> Result<Vec<PersistedTeam>>;
}
