//! Session history.
//!
//! [`SessionTimeline`] puts every known session into one chronological
//! order and answers "which session was `k` steps before this one".
//! Continuity scoring uses it to find the sessions whose teams it
//! compares against. [`SessionRecords`] is the read side of the storage
//! boundary.

mod timeline;
mod types;

pub use timeline::{previous_session, SessionTimeline};
pub use types::SessionRecords;
