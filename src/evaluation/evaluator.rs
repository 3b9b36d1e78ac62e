//! Scoring of candidate assignments against a session and its history.

use super::config::EvaluationConfig;
use super::scores::{
    completeness_score, composite_score, continuity_score, preference_points,
    team_fullness_score, CONTINUITY_LOOKBACKS,
};
use crate::error::{Result, RosterError};
use crate::history::{SessionRecords, SessionTimeline};
use crate::model::{Assignment, EligibilityEntry, EntryId, ParticipantId, SessionId, TeamSlots};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Sub-scores and composite for one assignment.
///
/// Every value lies in `[0, 1]`; higher is better.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    pub completeness: f64,
    pub team_fullness: f64,
    pub position_fit: f64,
    /// Per-team continuity against the previous session.
    pub continuity_1: Vec<f64>,
    /// Per-team continuity against two sessions back.
    pub continuity_2: Vec<f64>,
    /// Per-team continuity against three sessions back.
    pub continuity_3: Vec<f64>,
    pub composite: f64,
}

impl ScoreBreakdown {
    /// Per-team continuity at `lookback` (1–3).
    pub fn continuity(&self, lookback: usize) -> Option<&[f64]> {
        match lookback {
            1 => Some(self.continuity_1.as_slice()),
            2 => Some(self.continuity_2.as_slice()),
            3 => Some(self.continuity_3.as_slice()),
            _ => None,
        }
    }
}

/// A scored candidate, identified by its index in the ranked batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedRoster {
    pub index: usize,
    pub scores: ScoreBreakdown,
}

/// Everything scoring needs about one session, loaded once.
///
/// Holds the session's entries and, for each lookback, the member sets of
/// the teams committed in that earlier session (`None` when there is no
/// such session).
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    session: SessionId,
    entries: HashMap<EntryId, EligibilityEntry>,
    history: Vec<Option<Vec<HashSet<ParticipantId>>>>,
}

impl EvaluationContext {
    /// Loads the session's entries and its last three sessions' teams.
    pub fn load<S: SessionRecords + ?Sized>(records: &S, session: SessionId) -> Result<Self> {
        let entries: HashMap<EntryId, EligibilityEntry> = records
            .entries(session)?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        let timeline = SessionTimeline::load(records)?;
        let mut history: Vec<Option<Vec<HashSet<ParticipantId>>>> =
            Vec::with_capacity(CONTINUITY_LOOKBACKS);
        for lookback in 1..=CONTINUITY_LOOKBACKS {
            let past = match timeline.previous(session, lookback) {
                Some(previous) => {
                    let teams = records.teams(previous)?;
                    debug!(%session, %previous, lookback, teams = teams.len(), "loaded past teams");
                    Some(teams.iter().map(|t| t.members().collect()).collect())
                }
                None => None,
            };
            history.push(past);
        }

        Ok(Self {
            session,
            entries,
            history,
        })
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Number of entries registered for the session.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, id: EntryId) -> Result<&EligibilityEntry> {
        self.entries.get(&id).ok_or(RosterError::EntryNotFound {
            entry: id,
            session: self.session,
        })
    }

    /// Whether a session `lookback` steps back exists.
    pub fn has_history(&self, lookback: usize) -> bool {
        lookback >= 1
            && self
                .history
                .get(lookback - 1)
                .is_some_and(|past| past.is_some())
    }
}

/// Scores candidate assignments.
///
/// # Usage
///
/// ```ignore
/// let evaluator = RosterEvaluator::default();
/// let scores = evaluator.evaluate(&records, &generation.assignment, session)?;
/// let ranked = evaluator.rank(&records, session, &assignments)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterEvaluator {
    config: EvaluationConfig,
}

impl RosterEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Scores one assignment for `session`.
    ///
    /// # Errors
    /// [`RosterError::EntryNotFound`] if the assignment places an entry the
    /// session does not hold, [`RosterError::DuplicateEntry`] if an entry
    /// fills more than one slot; storage errors from `records`.
    pub fn evaluate<S: SessionRecords + ?Sized>(
        &self,
        records: &S,
        assignment: &Assignment,
        session: SessionId,
    ) -> Result<ScoreBreakdown> {
        let context = EvaluationContext::load(records, session)?;
        self.score(&context, assignment)
    }

    /// Scores one assignment against a loaded context.
    ///
    /// Reads only; scoring the same assignment twice gives equal results.
    pub fn score(&self, context: &EvaluationContext, assignment: &Assignment) -> Result<ScoreBreakdown> {
        let mut placed = HashSet::new();
        for id in assignment.placed_entries() {
            context.entry(id)?;
            if !placed.insert(id) {
                return Err(RosterError::DuplicateEntry {
                    entry: id,
                    session: context.session,
                });
            }
        }

        let leftover = context
            .entries
            .keys()
            .filter(|id| !placed.contains(*id))
            .count();
        let completeness = completeness_score(leftover);
        let team_fullness = team_fullness_score(assignment.teams().iter().map(TeamSlots::filled_count));
        let position_fit = self.position_fit(context, assignment)?;

        let mut continuity: Vec<Vec<f64>> = Vec::with_capacity(CONTINUITY_LOOKBACKS);
        for lookback in 1..=CONTINUITY_LOOKBACKS {
            continuity.push(self.team_continuity(context, assignment, lookback)?);
        }

        let composite = composite_score(
            completeness,
            team_fullness,
            position_fit,
            [
                continuity[0].as_slice(),
                continuity[1].as_slice(),
                continuity[2].as_slice(),
            ],
        );
        debug!(
            session = %context.session,
            leftover,
            completeness,
            team_fullness,
            position_fit,
            composite,
            "scored roster"
        );

        let mut continuity = continuity.into_iter();
        Ok(ScoreBreakdown {
            completeness,
            team_fullness,
            position_fit,
            continuity_1: continuity.next().unwrap_or_default(),
            continuity_2: continuity.next().unwrap_or_default(),
            continuity_3: continuity.next().unwrap_or_default(),
            composite,
        })
    }

    /// Scores a batch and orders it best-first by composite.
    ///
    /// Ties keep batch order. The session context is loaded once.
    pub fn rank<S: SessionRecords + ?Sized>(
        &self,
        records: &S,
        session: SessionId,
        assignments: &[Assignment],
    ) -> Result<Vec<RankedRoster>> {
        let context = EvaluationContext::load(records, session)?;
        let scores = self.score_all(&context, assignments)?;

        let mut ranked: Vec<RankedRoster> = scores
            .into_iter()
            .enumerate()
            .map(|(index, scores)| RankedRoster { index, scores })
            .collect();
        ranked.sort_by(|a, b| {
            b.scores
                .composite
                .partial_cmp(&a.scores.composite)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(best) = ranked.first() {
            info!(
                %session,
                candidates = ranked.len(),
                best_index = best.index,
                best_composite = best.scores.composite,
                "ranked candidate rosters"
            );
        }
        Ok(ranked)
    }

    /// The top-ranked candidate, or `None` for an empty batch.
    pub fn select_best<S: SessionRecords + ?Sized>(
        &self,
        records: &S,
        session: SessionId,
        assignments: &[Assignment],
    ) -> Result<Option<RankedRoster>> {
        Ok(self.rank(records, session, assignments)?.into_iter().next())
    }

    fn score_all(&self, context: &EvaluationContext, assignments: &[Assignment]) -> Result<Vec<ScoreBreakdown>> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return assignments
                .par_iter()
                .map(|a| self.score(context, a))
                .collect();
        }
        assignments.iter().map(|a| self.score(context, a)).collect()
    }

    /// Preference points over all filled slots, normalized by the
    /// session's entry count. An empty session scores 1.0.
    fn position_fit(&self, context: &EvaluationContext, assignment: &Assignment) -> Result<f64> {
        if context.entry_count() == 0 {
            return Ok(1.0);
        }
        let mut points = 0.0;
        for team in assignment.teams() {
            for (position, id) in team.filled() {
                points += preference_points(context.entry(id)?, position);
            }
        }
        Ok(points / context.entry_count() as f64)
    }

    /// Per-team continuity against the session `lookback` steps back.
    fn team_continuity(
        &self,
        context: &EvaluationContext,
        assignment: &Assignment,
        lookback: usize,
    ) -> Result<Vec<f64>> {
        let Some(past_teams) = context.history.get(lookback - 1).and_then(Option::as_ref) else {
            return Ok(vec![1.0; assignment.team_count()]);
        };

        assignment
            .teams()
            .iter()
            .map(|team| {
                let members = self.member_set(context, team)?;
                let overlap = past_teams
                    .iter()
                    .map(|past| past.intersection(&members).count())
                    .max()
                    .unwrap_or(0);
                Ok(continuity_score(overlap))
            })
            .collect()
    }

    /// Participants on `team` who count toward repeat overlap.
    ///
    /// With the partner exemption on, a member whose requested partner is
    /// already counted is skipped.
    fn member_set(&self, context: &EvaluationContext, team: &TeamSlots) -> Result<HashSet<ParticipantId>> {
        let mut counted: Vec<&EligibilityEntry> = Vec::with_capacity(4);
        for (_, id) in team.filled() {
            let entry = context.entry(id)?;
            let partner_counted = self.config.exempt_play_with_pairs
                && entry.play_with.as_deref().is_some_and(|name| {
                    counted.iter().any(|m| m.participant.full_name() == name)
                });
            if !partner_counted {
                counted.push(entry);
            }
        }
        Ok(counted.iter().map(|e| e.participant.id).collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::{InMemoryRecords, TeamStore};
    use crate::model::{Participant, PersistedTeam, Position};

    const PREVIOUS: SessionId = SessionId { year: 2020, number: 1 };
    const CURRENT: SessionId = SessionId { year: 2020, number: 2 };

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    fn entry(id: u64, first: &str, second: &str) -> EligibilityEntry {
        EligibilityEntry::new(
            EntryId(id),
            CURRENT,
            Participant::new(ParticipantId(id), "Player", id.to_string()),
        )
        .with_preference_labels(first, second)
    }

    /// Eight entries (ids 1–8, participant id = entry id) with no preferences.
    fn records_with(entries: Vec<EligibilityEntry>) -> InMemoryRecords {
        let mut records = InMemoryRecords::new();
        records.add_session(PREVIOUS);
        for e in entries {
            records.add_entry(e);
        }
        records
    }

    fn plain_records() -> InMemoryRecords {
        records_with((1..=8).map(|id| entry(id, "", "")).collect())
    }

    fn team(ids: [Option<u64>; 4]) -> TeamSlots {
        TeamSlots::from_slots(ids.map(|id| id.map(EntryId)))
    }

    fn past_team(number: u32, players: [u64; 4]) -> PersistedTeam {
        let mut t = PersistedTeam::new(PREVIOUS, number);
        for (position, id) in Position::ALL.into_iter().zip(players) {
            t = t.with_player(position, ParticipantId(id));
        }
        t
    }

    fn continuity_1(records: &InMemoryRecords, assignment: Assignment) -> Vec<f64> {
        RosterEvaluator::default()
            .evaluate(records, &assignment, CURRENT)
            .unwrap()
            .continuity_1
    }

    // ---- Completeness & fullness ----

    #[test]
    fn test_completeness_counts_leftover() {
        let records = plain_records();
        let evaluator = RosterEvaluator::default();

        let cases = [
            (vec![team([Some(1), Some(2), Some(3), Some(4)]), team([Some(5), Some(6), Some(7), Some(8)])], 1.0),
            (vec![team([Some(1), Some(2), Some(3), Some(4)]), team([Some(5), Some(6), Some(7), None])], 0.7),
            (vec![team([Some(1), Some(2), Some(3), Some(4)]), team([Some(5), Some(6), None, None])], 0.4),
            (vec![team([Some(1), Some(2), Some(3), Some(4)])], 0.0),
        ];
        for (teams, expected) in cases {
            let scores = evaluator
                .evaluate(&records, &Assignment::new(teams), CURRENT)
                .unwrap();
            assert!(approx(scores.completeness, expected));
        }
    }

    #[test]
    fn test_critical_team_zeroes_fullness() {
        let records = plain_records();
        let assignment = Assignment::new(vec![
            team([Some(1), Some(2), Some(3), Some(4)]),
            team([None, None, Some(5), Some(6)]),
        ]);
        let scores = RosterEvaluator::default()
            .evaluate(&records, &assignment, CURRENT)
            .unwrap();
        assert_eq!(scores.team_fullness, 0.0);
        assert_eq!(scores.composite, 0.0);
    }

    #[test]
    fn test_incomplete_team_costs_tenth() {
        let records = plain_records();
        let assignment = Assignment::new(vec![
            team([Some(1), Some(2), Some(3), None]),
            team([Some(5), Some(6), Some(7), Some(8)]),
        ]);
        let scores = RosterEvaluator::default()
            .evaluate(&records, &assignment, CURRENT)
            .unwrap();
        assert!(approx(scores.team_fullness, 0.9));
    }

    // ---- Position fit ----

    #[test]
    fn test_position_fit_mixed() {
        let records = records_with(vec![
            entry(1, "Skip", "Vice"),
            entry(2, "Skip", "Vice"),
            entry(3, "Lead", "Vice"),
            entry(4, "", ""),
            entry(5, "Lead", ""),
        ]);
        // 1.0 (first) + 0.5 (second) + 0.0 (neither) + 1.0 (no preference),
        // entry 5 on the bench.
        let assignment = Assignment::new(vec![team([Some(1), Some(2), Some(3), Some(4)])]);
        let scores = RosterEvaluator::default()
            .evaluate(&records, &assignment, CURRENT)
            .unwrap();
        assert!(approx(scores.position_fit, 2.5 / 5.0));
    }

    #[test]
    fn test_position_fit_empty_session() {
        let mut records = InMemoryRecords::new();
        records.add_session(CURRENT);
        let scores = RosterEvaluator::default()
            .evaluate(&records, &Assignment::default(), CURRENT)
            .unwrap();
        assert_eq!(scores.position_fit, 1.0);
        assert_eq!(scores.completeness, 1.0);
        assert_eq!(scores.composite, 1.0);
    }

    // ---- Continuity ----

    #[test]
    fn test_no_previous_session_is_neutral() {
        let mut records = InMemoryRecords::new();
        for id in 1..=8 {
            records.add_entry(entry(id, "", ""));
        }
        let assignment = Assignment::new(vec![
            team([Some(1), Some(2), Some(3), Some(4)]),
            team([Some(5), Some(6), None, None]),
        ]);
        let scores = RosterEvaluator::default()
            .evaluate(&records, &assignment, CURRENT)
            .unwrap();
        for lookback in 1..=3 {
            assert_eq!(scores.continuity(lookback).unwrap(), &[1.0, 1.0]);
        }
        assert!(scores.continuity(4).is_none());
    }

    #[test]
    fn test_continuity_overlap_table() {
        let cases = [
            ([5, 6, 7, 8], 1.0),
            ([1, 5, 6, 7], 1.0),
            ([1, 2, 5, 6], 0.66),
            ([1, 2, 4, 6], 0.33),
            ([1, 2, 4, 3], 0.0),
        ];
        for (current, expected) in cases {
            let mut records = plain_records();
            records
                .insert_teams(PREVIOUS, vec![past_team(1, [1, 2, 3, 4])])
                .unwrap();
            let assignment = Assignment::new(vec![team(current.map(Some))]);
            assert_eq!(continuity_1(&records, assignment), vec![expected]);
        }
    }

    #[test]
    fn test_continuity_takes_max_overlap() {
        let mut records = plain_records();
        records
            .insert_teams(
                PREVIOUS,
                vec![past_team(1, [1, 2, 3, 4]), past_team(2, [5, 6, 7, 8])],
            )
            .unwrap();
        let assignment = Assignment::new(vec![
            team([Some(1), Some(5), Some(6), Some(7)]),
            team([Some(2), Some(3), Some(8), Some(4)]),
        ]);
        assert_eq!(continuity_1(&records, assignment), vec![0.33, 0.33]);
    }

    #[test]
    fn test_previous_session_without_teams() {
        let records = plain_records();
        let assignment = Assignment::new(vec![team([Some(1), Some(2), Some(3), Some(4)])]);
        assert_eq!(continuity_1(&records, assignment), vec![1.0]);
    }

    #[test]
    fn test_requested_pair_counts_once() {
        let mut entries: Vec<_> = (1..=8).map(|id| entry(id, "", "")).collect();
        // Player 2 asked to play with player 1.
        entries[1] = entries[1].clone().with_play_with("Player 1");
        let mut records = records_with(entries);
        records
            .insert_teams(PREVIOUS, vec![past_team(1, [1, 2, 3, 4])])
            .unwrap();

        let assignment = Assignment::new(vec![team([Some(1), Some(2), Some(5), Some(6)])]);
        assert_eq!(continuity_1(&records, assignment.clone()), vec![1.0]);

        let strict = RosterEvaluator::new(EvaluationConfig::default().with_exempt_play_with_pairs(false));
        let scores = strict.evaluate(&records, &assignment, CURRENT).unwrap();
        assert_eq!(scores.continuity_1, vec![0.66]);
    }

    #[test]
    fn test_deeper_lookbacks() {
        let s1 = SessionId::new(2019, 1);
        let s2 = SessionId::new(2019, 2);
        let mut records = plain_records();
        records.add_session(s1);
        records.add_session(s2);
        // Timeline: 2019-1, 2019-2, 2020-1 (PREVIOUS), 2020-2 (CURRENT).
        records
            .insert_teams(s2, vec![{
                let mut t = PersistedTeam::new(s2, 1);
                for (position, id) in Position::ALL.into_iter().zip([1, 2, 3, 4]) {
                    t = t.with_player(position, ParticipantId(id));
                }
                t
            }])
            .unwrap();

        let assignment = Assignment::new(vec![
            team([Some(1), Some(2), Some(3), Some(4)]),
            team([Some(5), Some(6), Some(7), Some(8)]),
        ]);
        let scores = RosterEvaluator::default()
            .evaluate(&records, &assignment, CURRENT)
            .unwrap();
        assert_eq!(scores.continuity_1, vec![1.0, 1.0]);
        assert_eq!(scores.continuity_2, vec![0.0, 1.0]);
        assert_eq!(scores.continuity_3, vec![1.0, 1.0]);
        // 1.0 * (0.33 + 0.67 * 0.5) * 1.0
        assert!(approx(scores.composite, 0.665));
    }

    // ---- Errors & purity ----

    #[test]
    fn test_unknown_entry_is_fault() {
        let records = plain_records();
        let assignment = Assignment::new(vec![team([Some(1), Some(2), Some(3), Some(42)])]);
        let err = RosterEvaluator::default()
            .evaluate(&records, &assignment, CURRENT)
            .unwrap_err();
        assert_eq!(
            err,
            RosterError::EntryNotFound {
                entry: EntryId(42),
                session: CURRENT,
            }
        );
    }

    #[test]
    fn test_repeated_entry_is_fault() {
        let records = plain_records();
        let full = team([Some(1), Some(2), Some(3), Some(4)]);
        let assignment = Assignment::new(vec![full, full]);
        let err = RosterEvaluator::default()
            .evaluate(&records, &assignment, CURRENT)
            .unwrap_err();
        assert_eq!(
            err,
            RosterError::DuplicateEntry {
                entry: EntryId(1),
                session: CURRENT,
            }
        );
    }

    #[test]
    fn test_unknown_session() {
        let records = plain_records();
        let missing = SessionId::new(1999, 1);
        let err = RosterEvaluator::default()
            .evaluate(&records, &Assignment::default(), missing)
            .unwrap_err();
        assert_eq!(err, RosterError::SessionNotFound(missing));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let mut records = plain_records();
        records
            .insert_teams(PREVIOUS, vec![past_team(1, [1, 2, 3, 4])])
            .unwrap();
        let assignment = Assignment::new(vec![
            team([Some(1), Some(2), Some(5), Some(6)]),
            team([Some(3), Some(4), Some(7), None]),
        ]);
        let evaluator = RosterEvaluator::default();
        let a = evaluator.evaluate(&records, &assignment, CURRENT).unwrap();
        let b = evaluator.evaluate(&records, &assignment, CURRENT).unwrap();
        assert_eq!(a, b);
    }

    // ---- Ranking ----

    #[test]
    fn test_rank_orders_best_first() {
        let records = plain_records();
        let full = Assignment::new(vec![
            team([Some(1), Some(2), Some(3), Some(4)]),
            team([Some(5), Some(6), Some(7), Some(8)]),
        ]);
        let short = Assignment::new(vec![
            team([Some(1), Some(2), Some(3), Some(4)]),
            team([Some(5), Some(6), Some(7), None]),
        ]);
        let batch = vec![short.clone(), full, short];

        let evaluator = RosterEvaluator::default();
        let ranked = evaluator.rank(&records, CURRENT, &batch).unwrap();
        let order: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
        assert!(ranked[0].scores.composite >= ranked[1].scores.composite);

        let best = evaluator.select_best(&records, CURRENT, &batch).unwrap();
        assert_eq!(best.map(|r| r.index), Some(1));
        assert!(evaluator.select_best(&records, CURRENT, &[]).unwrap().is_none());
    }

    #[test]
    fn test_context_history_flags() {
        let records = plain_records();
        let context = EvaluationContext::load(&records, CURRENT).unwrap();
        assert_eq!(context.session(), CURRENT);
        assert_eq!(context.entry_count(), 8);
        assert!(context.has_history(1));
        assert!(!context.has_history(2));
        assert!(!context.has_history(0));
    }
}
