//! Persistence boundary for validated events.
//!
//! The core hands pipeline-approved events to an external [`EventStore`] and
//! never again touches them. Schema literals and insert statements belong
//! entirely to the store implementation; the core's side of the contract is
//! the trait below plus the persisted record layouts the store must honor.
//!
//! Read-side operations accept the same [`EventSearchParams`] shape the batch
//! loader uses to pre-resolve enrollments, so one parameter type covers both
//! sides of the boundary.

use crate::error::StoreResult;
use crate::event::{Event, EventStatus};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Search parameters for read-side queries and enrollment pre-resolution.
#[derive(Clone, Debug, Default)]
pub struct EventSearchParams {
    pub program: Option<String>,
    pub program_stage: Option<String>,
    pub org_unit: Option<String>,
    pub tracked_entity_instance: Option<String>,
    pub status: Option<EventStatus>,
    /// Inclusive lower bound on the event date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the event date.
    pub end_date: Option<NaiveDate>,
    /// Whether soft-deleted events are included in results.
    pub include_deleted: bool,
}

/// Flattened read-side projection of one stored event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRow {
    #[serde(rename = "event")]
    pub uid: String,
    pub program: String,
    pub program_stage: String,
    pub org_unit: String,
    pub status: EventStatus,
    pub due_date: Option<String>,
    pub event_date: Option<String>,
    pub stored_by: Option<String>,
    pub note_count: usize,
}

/// One row of the grid projection: column name to rendered cell value.
pub type GridRow = serde_json::Map<String, serde_json::Value>;

/// External store accepting validated events for durable commit.
///
/// The core calls [`EventStore::insert`] exactly once per admitted batch,
/// after identifier assignment and pipeline success; transaction semantics
/// are owned by the implementation.
pub trait EventStore: Send + Sync {
    /// Durably inserts a batch of validated events, returning the number of
    /// events written. Note rows and their ordering links are written as part
    /// of the same unit.
    fn insert(&self, events: &[Event]) -> StoreResult<usize>;

    /// Deletes the events with the given identifiers. Attached notes are
    /// removed with their owning event.
    fn delete(&self, uids: &[String]) -> StoreResult<()>;

    /// Full event objects matching `params`.
    fn events(&self, params: &EventSearchParams) -> StoreResult<Vec<Event>>;

    /// Flattened row projection of the events matching `params`.
    fn event_rows(&self, params: &EventSearchParams) -> StoreResult<Vec<EventRow>>;

    /// Grid projection (column name to cell value) of the events matching
    /// `params`.
    fn event_grid(&self, params: &EventSearchParams) -> StoreResult<Vec<GridRow>>;

    /// Number of events matching `params`.
    fn count(&self, params: &EventSearchParams) -> StoreResult<usize>;
}

/// Persisted layout of one event row, keyed by a server-assigned numeric
/// surrogate plus the exposed string identifier (unique, indexed).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: i64,
    pub uid: String,
    pub enrollment: Option<String>,
    pub program: String,
    pub program_stage: String,
    pub org_unit: String,
    pub status: EventStatus,
    pub due_date: Option<NaiveDateTime>,
    pub event_date: Option<NaiveDateTime>,
    pub created: Option<NaiveDateTime>,
    pub last_updated: Option<NaiveDateTime>,
    pub completed_by: Option<String>,
    pub stored_by: Option<String>,
    pub deleted: bool,
}

/// Persisted layout of one note row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: i64,
    pub uid: String,
    pub value: String,
    pub stored_by: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub last_updated: Option<NaiveDateTime>,
}

/// Join row associating a note with its owning event; `sort_order` preserves
/// the submitted note ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventNoteLink {
    pub event_id: i64,
    pub note_id: i64,
    pub sort_order: i32,
}
