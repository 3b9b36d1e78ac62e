//! Generation output: the assignment plus what could not be honored.

use crate::model::{Assignment, EntryId, Position};

/// A condition the generator worked around rather than failed on.
///
/// Team indices are zero-based positions in the assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// No remaining entry listed `position` as either preference.
    UnfilledSlot { team_index: usize, position: Position },

    /// `entry` asked to play with `partner`, but neither of the partner's
    /// preferred slots was open on that team.
    PartnerUnplaced {
        team_index: usize,
        entry: EntryId,
        partner: EntryId,
    },

    /// `entry` was not placed on any team.
    Leftover { entry: EntryId },
}

/// One candidate assignment and its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation {
    /// The candidate roster.
    pub assignment: Assignment,

    /// Entries on no team (the bench), in pool order.
    pub leftover: Vec<EntryId>,

    /// Unfilled slots, unplaced partners and leftovers, in the order they
    /// were detected.
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    /// Slots that stayed empty, as `(team_index, position)`.
    pub fn unfilled_slots(&self) -> impl Iterator<Item = (usize, Position)> + '_ {
        self.diagnostics.iter().filter_map(|d| match *d {
            Diagnostic::UnfilledSlot {
                team_index,
                position,
            } => Some((team_index, position)),
            _ => None,
        })
    }

    /// Whether every team is full and nobody is on the bench.
    pub fn is_complete(&self) -> bool {
        self.leftover.is_empty() && self.unfilled_slots().next().is_none()
    }
}
