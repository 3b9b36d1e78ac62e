//! Candidate assignments: ordered teams of position slots.

use super::types::{EligibilityEntry, EntryId, Position, SessionId};
use crate::error::{Result, RosterError};
use std::collections::{HashMap, HashSet};

/// One team of a candidate assignment.
///
/// Each position holds at most one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamSlots {
    slots: [Option<EntryId>; 4],
}

impl TeamSlots {
    /// Creates a team with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a team from slots in position order (Skip, Vice, Second, Lead).
    pub fn from_slots(slots: [Option<EntryId>; 4]) -> Self {
        Self { slots }
    }

    pub fn get(&self, position: Position) -> Option<EntryId> {
        self.slots[position.index()]
    }

    pub fn is_open(&self, position: Position) -> bool {
        self.slots[position.index()].is_none()
    }

    pub fn set(&mut self, position: Position, entry: Option<EntryId>) {
        self.slots[position.index()] = entry;
    }

    /// Number of non-empty slots (0–4).
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Filled slots in position order.
    pub fn filled(&self) -> impl Iterator<Item = (Position, EntryId)> + '_ {
        Position::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|id| (p, id)))
    }
}

/// A candidate assignment: an ordered sequence of teams.
///
/// The order is generation order only; it becomes the team numbering
/// when the assignment is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    teams: Vec<TeamSlots>,
}

/// An assignment team with its entries resolved, in position order.
pub type HydratedTeam<'a> = [Option<&'a EligibilityEntry>; 4];

impl Assignment {
    pub fn new(teams: Vec<TeamSlots>) -> Self {
        Self { teams }
    }

    pub fn teams(&self) -> &[TeamSlots] {
        &self.teams
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Total number of filled slots across all teams.
    pub fn filled_count(&self) -> usize {
        self.teams.iter().map(TeamSlots::filled_count).sum()
    }

    /// Every placed entry id, team by team in position order.
    pub fn placed_entries(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.teams.iter().flat_map(|t| t.filled().map(|(_, id)| id))
    }

    pub fn contains(&self, entry: EntryId) -> bool {
        self.placed_entries().any(|id| id == entry)
    }

    /// Resolves every slot to its entry for display.
    ///
    /// # Errors
    /// [`RosterError::EntryNotFound`] if a slot names an entry absent from
    /// `entries`, [`RosterError::DuplicateEntry`] if an entry fills more
    /// than one slot.
    pub fn hydrate<'a>(
        &self,
        entries: &'a [EligibilityEntry],
        session: SessionId,
    ) -> Result<Vec<HydratedTeam<'a>>> {
        let by_id: HashMap<EntryId, &EligibilityEntry> =
            entries.iter().map(|e| (e.id, e)).collect();
        let mut seen = HashSet::new();

        self.teams
            .iter()
            .map(|team| {
                let mut hydrated: HydratedTeam<'a> = [None; 4];
                for (position, id) in team.filled() {
                    if !seen.insert(id) {
                        return Err(RosterError::DuplicateEntry { entry: id, session });
                    }
                    let entry = by_id
                        .get(&id)
                        .copied()
                        .ok_or(RosterError::EntryNotFound { entry: id, session })?;
                    hydrated[position.index()] = Some(entry);
                }
                Ok(hydrated)
            })
            .collect()
    }
}

impl FromIterator<TeamSlots> for Assignment {
    fn from_iter<T: IntoIterator<Item = TeamSlots>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
