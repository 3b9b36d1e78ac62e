//! Constrained greedy placement of one candidate roster.
//!
//! [`RosterGenerator`] fills teams position by position (Skip, Vice,
//! Second, Lead), drawing uniformly among the remaining entries that list
//! the position as their first preference, falling back to the second.
//! With partner propagation enabled, each placement may pull a requested
//! partner onto the same team at one of the partner's own preferences.

use super::types::{Diagnostic, Generation};
use crate::model::{Assignment, EligibilityEntry, Position, TeamSlots};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Team slots during generation, holding indices into the pool.
type WorkingTeam = [Option<usize>; 4];

/// Entries not yet placed, as indices into an immutable pool snapshot.
///
/// Every placement step removes exactly one index; nothing else changes
/// the pool during a run.
#[derive(Debug, Clone)]
pub(crate) struct RemainingPool {
    indices: Vec<usize>,
}

impl RemainingPool {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Remaining entries eligible for `position`: first-preference matches
    /// if there are any, otherwise second-preference matches.
    pub(crate) fn candidates(&self, pool: &[EligibilityEntry], position: Position) -> Vec<usize> {
        let first: Vec<usize> = self
            .iter()
            .filter(|&i| pool[i].preferred_position_1 == Some(position))
            .collect();
        if !first.is_empty() {
            return first;
        }
        self.iter()
            .filter(|&i| pool[i].preferred_position_2 == Some(position))
            .collect()
    }

    /// Picks a candidate for `position` uniformly at random.
    pub(crate) fn select<R: Rng>(
        &self,
        pool: &[EligibilityEntry],
        position: Position,
        rng: &mut R,
    ) -> Option<usize> {
        self.candidates(pool, position).choose(rng).copied()
    }

    /// First remaining entry whose participant goes by `full_name`.
    pub(crate) fn find_by_name(&self, pool: &[EligibilityEntry], full_name: &str) -> Option<usize> {
        self.iter()
            .find(|&i| pool[i].participant.full_name() == full_name)
    }

    /// Removes `index`. Returns `false` if it was already placed.
    pub(crate) fn take(&mut self, index: usize) -> bool {
        match self.indices.iter().position(|&i| i == index) {
            Some(at) => {
                self.indices.remove(at);
                true
            }
            None => false,
        }
    }
}

/// Builds one candidate assignment from a session's entry pool.
///
/// The pool is borrowed and never modified, so any number of runs can
/// share it.
///
/// # Usage
///
/// ```ignore
/// let generator = RosterGenerator::new(&entries);
/// let mut rng = StdRng::seed_from_u64(42);
/// let generation = generator.generate(true, &mut rng);
/// for d in &generation.diagnostics { /* report */ }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RosterGenerator<'a> {
    pool: &'a [EligibilityEntry],
}

impl<'a> RosterGenerator<'a> {
    pub fn new(pool: &'a [EligibilityEntry]) -> Self {
        Self { pool }
    }

    /// Number of teams a run produces: `floor(pool / 4)`.
    pub fn team_count(&self) -> usize {
        self.pool.len() / 4
    }

    /// Runs one placement.
    ///
    /// Randomness comes only from `rng`; the same pool and rng state give
    /// the same result.
    pub fn generate<R: Rng>(&self, use_play_with: bool, rng: &mut R) -> Generation {
        let mut remaining = RemainingPool::new(self.pool.len());
        let mut teams: Vec<WorkingTeam> = vec![[None; 4]; self.team_count()];
        let mut diagnostics = Vec::new();

        for position in Position::ALL {
            for (team_index, team) in teams.iter_mut().enumerate() {
                if team[position.index()].is_none() {
                    if let Some(chosen) = remaining.select(self.pool, position, rng) {
                        self.place(team_index, team, position, chosen, &mut remaining);
                        if use_play_with {
                            self.add_partners(team_index, team, &mut remaining, &mut diagnostics);
                        }
                    }
                }
                if team[position.index()].is_none() {
                    warn!(team = team_index + 1, %position, "no eligible entry for slot");
                    diagnostics.push(Diagnostic::UnfilledSlot {
                        team_index,
                        position,
                    });
                }
            }
        }

        if remaining.len() > 0 {
            warn!(count = remaining.len(), "entries left off every team");
        }
        let leftover: Vec<_> = remaining.iter().map(|i| self.pool[i].id).collect();
        diagnostics.extend(leftover.iter().map(|&entry| Diagnostic::Leftover { entry }));

        let assignment: Assignment = teams
            .into_iter()
            .map(|team| TeamSlots::from_slots(team.map(|slot| slot.map(|i| self.pool[i].id))))
            .collect();

        // A partner that missed the team at request time may still have
        // landed on it in a later pass.
        diagnostics.retain(|d| match *d {
            Diagnostic::PartnerUnplaced {
                team_index,
                partner,
                ..
            } => !assignment.teams()[team_index]
                .filled()
                .any(|(_, id)| id == partner),
            _ => true,
        });

        Generation {
            assignment,
            leftover,
            diagnostics,
        }
    }

    fn place(
        &self,
        team_index: usize,
        team: &mut WorkingTeam,
        position: Position,
        chosen: usize,
        remaining: &mut RemainingPool,
    ) {
        team[position.index()] = Some(chosen);
        remaining.take(chosen);
        debug!(
            team = team_index + 1,
            %position,
            participant = %self.pool[chosen].participant,
            "placed entry"
        );
    }

    /// Pulls requested partners of the team's members onto the team.
    ///
    /// Members are scanned in position order, including members added
    /// during this scan at later positions.
    fn add_partners(
        &self,
        team_index: usize,
        team: &mut WorkingTeam,
        remaining: &mut RemainingPool,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for position in Position::ALL {
            let Some(member_index) = team[position.index()] else {
                continue;
            };
            let member = &self.pool[member_index];
            let Some(name) = member.play_with.as_deref() else {
                continue;
            };
            let Some(partner_index) = remaining.find_by_name(self.pool, name) else {
                continue;
            };
            let partner = &self.pool[partner_index];

            let open = [partner.preferred_position_1, partner.preferred_position_2]
                .into_iter()
                .flatten()
                .find(|p| team[p.index()].is_none());

            match open {
                Some(partner_position) => {
                    self.place(team_index, team, partner_position, partner_index, remaining);
                    debug!(
                        team = team_index + 1,
                        member = %member.participant,
                        partner = %partner.participant,
                        "added requested partner"
                    );
                }
                None => {
                    warn!(
                        team = team_index + 1,
                        member = %member.participant,
                        partner = %partner.participant,
                        "no open preferred slot for requested partner"
                    );
                    let diagnostic = Diagnostic::PartnerUnplaced {
                        team_index,
                        entry: member.id,
                        partner: partner.id,
                    };
                    if !diagnostics.contains(&diagnostic) {
                        diagnostics.push(diagnostic);
                    }
                }
            }
        }
    }
}

/// Generates one candidate assignment from `pool`.
pub fn generate_single<R: Rng>(
    pool: &[EligibilityEntry],
    use_play_with: bool,
    rng: &mut R,
) -> Generation {
    RosterGenerator::new(pool).generate(use_play_with, rng)
}

// ============================================================================
// Tests
// ============================================================================
