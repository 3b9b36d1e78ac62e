//! Committing a chosen assignment as persisted teams.

use super::store::TeamStore;
use crate::error::Result;
use crate::generation::{Generation, RosterGenerator};
use crate::model::{Assignment, EligibilityEntry, PersistedTeam, Position, SessionId};
use rand::Rng;
use tracing::info;

/// Teams written by [`TeamApplier::generate_for_session`], with the
/// generation they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedRoster {
    pub teams: Vec<PersistedTeam>,
    pub generation: Generation,
}

/// Turns assignments into persisted teams.
///
/// Team numbers follow assignment order starting at 1. All teams are
/// resolved before anything is written and go to the store in one
/// [`TeamStore::insert_teams`] call, so a failed commit leaves the
/// session untouched.
pub struct TeamApplier;

impl TeamApplier {
    /// Resolves `assignment` against the session's entries without writing.
    ///
    /// # Errors
    /// [`RosterError::EntryNotFound`](crate::RosterError::EntryNotFound)
    /// if a slot names an entry missing from `entries`,
    /// [`RosterError::DuplicateEntry`](crate::RosterError::DuplicateEntry)
    /// if an entry fills more than one slot.
    pub fn build_teams(
        entries: &[EligibilityEntry],
        session: SessionId,
        assignment: &Assignment,
    ) -> Result<Vec<PersistedTeam>> {
        let hydrated = assignment.hydrate(entries, session)?;
        Ok(hydrated
            .iter()
            .zip(1u32..)
            .map(|(slots, number)| {
                let mut team = PersistedTeam::new(session, number);
                for position in Position::ALL {
                    if let Some(entry) = slots[position.index()] {
                        team = team.with_player(position, entry.participant.id);
                    }
                }
                team
            })
            .collect())
    }

    /// Writes `assignment` as the teams of `session`.
    pub fn commit<S: TeamStore + ?Sized>(
        store: &mut S,
        session: SessionId,
        assignment: &Assignment,
    ) -> Result<Vec<PersistedTeam>> {
        let entries = store.entries(session)?;
        let teams = Self::build_teams(&entries, session, assignment)?;
        store.insert_teams(session, teams.clone())?;
        info!(%session, teams = teams.len(), "committed roster");
        Ok(teams)
    }

    /// Removes the committed teams of `session`.
    pub fn clear<S: TeamStore + ?Sized>(store: &mut S, session: SessionId) -> Result<usize> {
        let removed = store.clear_teams(session)?;
        info!(%session, removed, "cleared teams");
        Ok(removed)
    }

    /// Generates one assignment from the session's entries and commits it.
    pub fn generate_for_session<S: TeamStore + ?Sized, R: Rng>(
        store: &mut S,
        session: SessionId,
        use_play_with: bool,
        rng: &mut R,
    ) -> Result<CommittedRoster> {
        let entries = store.entries(session)?;
        let generation = RosterGenerator::new(&entries).generate(use_play_with, rng);
        let teams = Self::build_teams(&entries, session, &generation.assignment)?;
        store.insert_teams(session, teams.clone())?;
        info!(
            %session,
            use_play_with,
            teams = teams.len(),
            leftover = generation.leftover.len(),
            "generated and committed roster"
        );
        Ok(CommittedRoster { teams, generation })
    }
}
