//! League data model.
//!
//! Participants and sessions come from the storage collaborator; the
//! generator and evaluator only read them. A candidate [`Assignment`]
//! is ephemeral and refers to entries by [`EntryId`]; once chosen, it
//! is turned into [`PersistedTeam`] records that refer to participants.
//!
//! # Key Types
//!
//! - [`Position`]: Skip, Vice, Second, Lead (also the slot order)
//! - [`SessionId`]: `(year, number)`, ordered chronologically
//! - [`EligibilityEntry`]: a participant's preferences for one session
//! - [`Assignment`] / [`TeamSlots`]: a candidate roster
//! - [`PersistedTeam`]: the committed form of a team

mod assignment;
mod types;

pub use assignment::{Assignment, HydratedTeam, TeamSlots};
pub use types::{
    EligibilityEntry, EntryId, Participant, ParticipantId, PersistedTeam, Position, SessionId,
};
