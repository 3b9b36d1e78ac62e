//! Sub-score tables and the composite formula.

use crate::model::{EligibilityEntry, Position};

/// Session lookbacks scored for continuity: 1, 2 and 3 sessions back.
pub const CONTINUITY_LOOKBACKS: usize = 3;

/// Completeness from the number of benched entries.
///
/// 0 → 1.0, 1 → 0.7, 2 → 0.4, 3 or more → 0.0.
pub fn completeness_score(leftover: usize) -> f64 {
    match leftover {
        0 => 1.0,
        1 => 0.7,
        2 => 0.4,
        _ => 0.0,
    }
}

/// Team fullness from the filled-slot count of every team.
///
/// Any team under three players zeroes the score. Otherwise each
/// team short of four costs 0.1, with more than three short teams
/// scoring a flat 0.5.
pub fn team_fullness_score<I>(filled_counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let mut incomplete = 0usize;
    for filled in filled_counts {
        if filled < 3 {
            return 0.0;
        }
        if filled < 4 {
            incomplete += 1;
        }
    }
    if incomplete > 3 {
        0.5
    } else {
        1.0 - 0.1 * incomplete as f64
    }
}

/// Preference points for `entry` playing `position`.
///
/// First preference 1.0, second 0.5. An entry with no canonical preference
/// at all is satisfied anywhere and earns 1.0; otherwise 0.0.
pub fn preference_points(entry: &EligibilityEntry, position: Position) -> f64 {
    if entry.preferred_position_1 == Some(position) {
        1.0
    } else if entry.preferred_position_2 == Some(position) {
        0.5
    } else if !entry.has_stated_preference() {
        1.0
    } else {
        0.0
    }
}

/// Continuity from the largest overlap with any past team.
///
/// 0–1 shared → 1.0, 2 → 0.66, 3 → 0.33, 4 or more → 0.0.
pub fn continuity_score(overlap: usize) -> f64 {
    match overlap {
        0 | 1 => 1.0,
        2 => 0.66,
        3 => 0.33,
        _ => 0.0,
    }
}

/// Arithmetic mean; an empty slice averages to 1.0.
pub fn mean_or_neutral(values: &[f64]) -> f64 {
    if values.is_empty() {
        1.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Combines the sub-scores.
///
/// Continuity two and three sessions back is blended toward 1.0 so that it
/// weighs progressively less than the previous session.
pub fn composite_score(
    completeness: f64,
    team_fullness: f64,
    position_fit: f64,
    continuity: [&[f64]; CONTINUITY_LOOKBACKS],
) -> f64 {
    let [c1, c2, c3] = continuity.map(mean_or_neutral);
    completeness
        * team_fullness
        * position_fit
        * c1
        * (0.33 + 0.67 * c2)
        * (0.67 + 0.33 * c3)
}
