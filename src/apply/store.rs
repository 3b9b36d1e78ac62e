//! Write boundary and the in-memory record store.

use crate::error::{Result, RosterError};
use crate::history::SessionRecords;
use crate::model::{EligibilityEntry, EntryId, PersistedTeam, SessionId};
use std::collections::{BTreeMap, HashSet};

/// Write access to committed teams.
pub trait TeamStore: SessionRecords {
    /// Stores every team in `teams` for `session`, or none of them.
    ///
    /// # Errors
    /// Implementations reject the whole batch on any failure, leaving the
    /// session's stored teams unchanged.
    fn insert_teams(&mut self, session: SessionId, teams: Vec<PersistedTeam>) -> Result<()>;

    /// Removes all teams of `session`, returning how many were removed.
    fn clear_teams(&mut self, session: SessionId) -> Result<usize>;
}

#[derive(Debug, Clone, Default)]
struct SessionData {
    entries: Vec<EligibilityEntry>,
    teams: Vec<PersistedTeam>,
}

/// Records held in memory.
///
/// Used by tests and benches, and by embedders that load a league from
/// their own storage and only need the core to read and write it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecords {
    sessions: BTreeMap<SessionId, SessionData>,
}

impl InMemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session. Returns `false` if it was already known.
    pub fn add_session(&mut self, session: SessionId) -> bool {
        if self.sessions.contains_key(&session) {
            return false;
        }
        self.sessions.insert(session, SessionData::default());
        true
    }

    /// Adds an entry to its session, registering the session if needed.
    ///
    /// An entry with the same id replaces the existing one.
    pub fn add_entry(&mut self, entry: EligibilityEntry) {
        let data = self.sessions.entry(entry.session).or_default();
        match data.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => data.entries.push(entry),
        }
    }

    /// Removes an entry, returning it if present.
    pub fn remove_entry(&mut self, session: SessionId, id: EntryId) -> Option<EligibilityEntry> {
        let data = self.sessions.get_mut(&session)?;
        let at = data.entries.iter().position(|e| e.id == id)?;
        Some(data.entries.remove(at))
    }

    fn data(&self, session: SessionId) -> Result<&SessionData> {
        self.sessions
            .get(&session)
            .ok_or(RosterError::SessionNotFound(session))
    }
}

impl SessionRecords for InMemoryRecords {
    fn sessions(&self) -> Result<Vec<SessionId>> {
        Ok(self.sessions.keys().copied().collect())
    }

    fn entries(&self, session: SessionId) -> Result<Vec<EligibilityEntry>> {
        Ok(self.data(session)?.entries.clone())
    }

    fn teams(&self, session: SessionId) -> Result<Vec<PersistedTeam>> {
        Ok(self.data(session)?.teams.clone())
    }
}

impl TeamStore for InMemoryRecords {
    fn insert_teams(&mut self, session: SessionId, teams: Vec<PersistedTeam>) -> Result<()> {
        let data = self
            .sessions
            .get_mut(&session)
            .ok_or(RosterError::SessionNotFound(session))?;

        let mut numbers: HashSet<u32> = data.teams.iter().map(|t| t.number).collect();
        for team in &teams {
            if team.session != session {
                return Err(RosterError::Storage(format!(
                    "team {} belongs to session {}, not {}",
                    team.number, team.session, session
                )));
            }
            if !numbers.insert(team.number) {
                return Err(RosterError::TeamNumberConflict {
                    session,
                    number: team.number,
                });
            }
        }

        data.teams.extend(teams);
        Ok(())
    }

    fn clear_teams(&mut self, session: SessionId) -> Result<usize> {
        let data = self
            .sessions
            .get_mut(&session)
            .ok_or(RosterError::SessionNotFound(session))?;
        let removed = data.teams.len();
        data.teams.clear();
        Ok(removed)
    }
}
