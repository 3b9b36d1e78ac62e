//! Participants, sessions, eligibility entries and persisted teams.

use std::fmt;

/// One of the four canonical team positions.
///
/// The declaration order is the placement order used by the generator
/// and the slot order of every team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    Skip,
    Vice,
    Second,
    Lead,
}

impl Position {
    /// All positions in placement order.
    pub const ALL: [Position; 4] = [
        Position::Skip,
        Position::Vice,
        Position::Second,
        Position::Lead,
    ];

    /// Slot index of this position within a team.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical label as it appears on registration forms.
    pub fn label(self) -> &'static str {
        match self {
            Position::Skip => "Skip",
            Position::Vice => "Vice",
            Position::Second => "Second",
            Position::Lead => "Lead",
        }
    }

    /// Parses a registration label.
    ///
    /// Surrounding whitespace and ASCII case are ignored. Blank or unknown
    /// labels return `None`, which the generator and evaluator treat as
    /// "no preference".
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of a league participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant #{}", self.0)
    }
}

/// Identity of an eligibility entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A league session.
///
/// The derived ordering compares `year` first and `number` second, which
/// is the chronological order used for history lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionId {
    pub year: i32,
    pub number: u32,
}

impl SessionId {
    pub fn new(year: i32, number: u32) -> Self {
        Self { year, number }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.year, self.number)
    }
}

/// A league member. Only `id` and the display name matter to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub first_name: String,
    pub last_name: String,
    pub home_phone: Option<String>,
    pub work_phone: Option<String>,
    pub cell_phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
}

impl Participant {
    pub fn new(id: ParticipantId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            home_phone: None,
            work_phone: None,
            cell_phone: None,
            email: None,
            gender: None,
        }
    }

    /// Builds a participant from a `"Last, First"` roster name.
    ///
    /// Names without exactly one `", "` separator yield empty first and
    /// last names.
    pub fn from_roster_name(id: ParticipantId, roster_name: &str) -> Self {
        let mut parts = roster_name.split(", ");
        match (parts.next(), parts.next(), parts.next()) {
            (Some(last), Some(first), None) => Self::new(id, first, last),
            _ => {
                tracing::warn!(name = roster_name, "could not parse roster name");
                Self::new(id, "", "")
            }
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_cell_phone(mut self, phone: impl Into<String>) -> Self {
        self.cell_phone = Some(phone.into());
        self
    }

    /// Display name used for partner matching: `"<first> <last>"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// A participant's registration and preferences for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EligibilityEntry {
    pub id: EntryId,
    pub session: SessionId,
    pub participant: Participant,
    pub preferred_position_1: Option<Position>,
    pub preferred_position_2: Option<Position>,
    /// Full display name of the requested teammate.
    pub play_with: Option<String>,
    /// Experience metric. Carried for callers; scoring ignores it.
    pub years_played: u32,
}

impl EligibilityEntry {
    pub fn new(id: EntryId, session: SessionId, participant: Participant) -> Self {
        Self {
            id,
            session,
            participant,
            preferred_position_1: None,
            preferred_position_2: None,
            play_with: None,
            years_played: 0,
        }
    }

    pub fn with_preferences(mut self, first: Option<Position>, second: Option<Position>) -> Self {
        self.preferred_position_1 = first;
        self.preferred_position_2 = second;
        self
    }

    /// Sets both preferences from raw form labels (see [`Position::from_label`]).
    pub fn with_preference_labels(self, first: &str, second: &str) -> Self {
        self.with_preferences(Position::from_label(first), Position::from_label(second))
    }

    /// Sets the requested teammate. A blank name clears the request.
    pub fn with_play_with(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.play_with = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn with_years_played(mut self, years: u32) -> Self {
        self.years_played = years;
        self
    }

    /// Whether either preference names a canonical position.
    pub fn has_stated_preference(&self) -> bool {
        self.preferred_position_1.is_some() || self.preferred_position_2.is_some()
    }

    /// Whether this entry asks to play with the participant named `full_name`.
    pub fn requests(&self, full_name: &str) -> bool {
        self.play_with.as_deref() == Some(full_name)
    }
}

/// The durable form of one team, written by the applier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistedTeam {
    pub session: SessionId,
    pub number: u32,
    pub players: [Option<ParticipantId>; 4],
}

impl PersistedTeam {
    pub fn new(session: SessionId, number: u32) -> Self {
        Self {
            session,
            number,
            players: [None; 4],
        }
    }

    pub fn with_player(mut self, position: Position, participant: ParticipantId) -> Self {
        self.players[position.index()] = Some(participant);
        self
    }

    pub fn player(&self, position: Position) -> Option<ParticipantId> {
        self.players[position.index()]
    }

    /// Participants on this team, in position order.
    pub fn members(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.players.iter().flatten().copied()
    }
}
