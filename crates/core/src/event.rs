//! Event and note data model.
//!
//! An [`Event`] is one point-in-time data capture tied to a program stage and
//! an enrollment. The date-bearing client fields are kept as raw strings here:
//! whether they conform to the accepted date grammar is a validation concern
//! (see [`crate::checks::EventBaseCheck`]), not a type concern, and rejected
//! events must surface the offending raw value unchanged.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an event.
///
/// The validation pipeline never inspects an event's own status; it is carried
/// for the persistence boundary and read-side projections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Active,
    Completed,
    Visited,
    Schedule,
    Overdue,
    Skipped,
}

/// One data-capture instance submitted for import.
///
/// The `uid` field is the exposed string identifier. For newly submitted
/// events it is always overwritten by identifier assignment, so a
/// client-supplied value is never trusted (see [`crate::uid_assign`]).
/// Once assigned, the identifier is immutable and unique across the whole
/// event population, soft-deleted records included.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    /// Exposed string identifier (11-character code).
    #[serde(rename = "event")]
    pub uid: String,
    /// Reference to the enrollment this event belongs to, when known upfront.
    pub enrollment: Option<String>,
    /// Program identifier.
    pub program: String,
    /// Program stage identifier.
    pub program_stage: String,
    /// Organisation unit identifier.
    pub org_unit: String,
    pub status: EventStatus,
    /// Scheduled date, as submitted by the client.
    pub due_date: Option<String>,
    /// Date the event actually took place, as submitted by the client.
    pub event_date: Option<String>,
    /// Server-side creation timestamp.
    pub created: Option<String>,
    /// Server-side last-update timestamp.
    pub last_updated: Option<String>,
    /// Creation timestamp as declared by the submitting client.
    pub created_at_client: Option<String>,
    /// Last-update timestamp as declared by the submitting client.
    pub last_updated_at_client: Option<String>,
    /// Actor who completed the event.
    pub completed_by: Option<String>,
    /// Actor who stored the event.
    pub stored_by: Option<String>,
    /// Soft-delete flag. Identifiers of deleted events are never reused.
    pub deleted: bool,
    /// Free-text annotations, in submission order. Owned exclusively by this
    /// event and removed with it on delete.
    pub notes: Vec<Note>,
}

/// Free-text annotation attached to an [`Event`].
///
/// Note identifiers share the event identifier uniqueness domain, but unlike
/// event identifiers a well-formed externally supplied value is kept on
/// import rather than regenerated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Note {
    /// Exposed string identifier (11-character code).
    #[serde(rename = "note")]
    pub uid: String,
    /// Free-text body.
    pub value: String,
    /// Actor who wrote the note.
    pub stored_by: Option<String>,
    pub created: Option<String>,
    pub last_updated: Option<String>,
}
