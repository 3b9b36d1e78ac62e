//! Error type shared by the roster pipeline.

use crate::model::{EntryId, SessionId};
use thiserror::Error;

/// Failures surfaced by evaluation, commit and storage.
///
/// Conditions the pipeline can work around (an unfillable slot, a partner
/// that does not fit, a session without history) are not errors; they show
/// up as [`Diagnostic`](crate::generation::Diagnostic)s or neutral scores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// An assignment references an entry that the session does not hold.
    #[error("eligibility entry {entry} not found in session {session}")]
    EntryNotFound { entry: EntryId, session: SessionId },

    /// An assignment places the same entry in more than one slot.
    #[error("eligibility entry {entry} placed more than once in session {session}")]
    DuplicateEntry { entry: EntryId, session: SessionId },

    /// The session is unknown to the record source.
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    /// A team number is already taken within the session.
    #[error("team {number} already exists for session {session}")]
    TeamNumberConflict { session: SessionId, number: u32 },

    /// A config failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The storage collaborator rejected a read or write.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_not_found_message() {
        let err = RosterError::EntryNotFound {
            entry: EntryId(7),
            session: SessionId::new(2024, 2),
        };
        assert_eq!(
            err.to_string(),
            "eligibility entry #7 not found in session 2024 - 2"
        );
    }

    #[test]
    fn test_duplicate_entry_message() {
        let err = RosterError::DuplicateEntry {
            entry: EntryId(3),
            session: SessionId::new(2024, 1),
        };
        assert_eq!(
            err.to_string(),
            "eligibility entry #3 placed more than once in session 2024 - 1"
        );
    }

    #[test]
    fn test_conflict_message() {
        let err = RosterError::TeamNumberConflict {
            session: SessionId::new(2023, 1),
            number: 3,
        };
        assert_eq!(err.to_string(), "team 3 already exists for session 2023 - 1");
    }
}
