//! Chronological session lookup.

use super::types::SessionRecords;
use crate::error::Result;
use crate::model::SessionId;

/// All known sessions in chronological order.
///
/// Order is `(year, number)` ascending, so a session's predecessor is
/// simply the previous element, whether it is in the same year or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTimeline {
    sessions: Vec<SessionId>,
}

impl SessionTimeline {
    /// Builds a timeline; input order and duplicates do not matter.
    pub fn new(sessions: impl IntoIterator<Item = SessionId>) -> Self {
        let mut sessions: Vec<SessionId> = sessions.into_iter().collect();
        sessions.sort_unstable();
        sessions.dedup();
        Self { sessions }
    }

    /// Builds a timeline from every session the records know about.
    pub fn load<S: SessionRecords + ?Sized>(records: &S) -> Result<Self> {
        Ok(Self::new(records.sessions()?))
    }

    pub fn sessions(&self) -> &[SessionId] {
        &self.sessions
    }

    pub fn contains(&self, session: SessionId) -> bool {
        self.sessions.binary_search(&session).is_ok()
    }

    /// Returns the session `lookback` positions before `session`.
    ///
    /// Only sessions strictly earlier than `session` count, so `session`
    /// does not itself need to be on the timeline. Returns `None` when
    /// fewer than `lookback` sessions precede it. A lookback of zero
    /// returns `session` when it is known.
    pub fn previous(&self, session: SessionId, lookback: usize) -> Option<SessionId> {
        if lookback == 0 {
            return self.contains(session).then_some(session);
        }
        let preceding = self.sessions.partition_point(|s| *s < session);
        preceding
            .checked_sub(lookback)
            .map(|idx| self.sessions[idx])
    }
}

/// One-shot lookup of the session `lookback` steps before `session`.
pub fn previous_session<S: SessionRecords + ?Sized>(
    records: &S,
    session: SessionId,
    lookback: usize,
) -> Result<Option<SessionId>> {
    Ok(SessionTimeline::load(records)?.previous(session, lookback))
}
