//! # etrack core
//!
//! Core import logic for the event tracker: decide, for each externally
//! submitted event record, whether it is admissible for storage, then hand
//! admitted records to the persistence boundary along with their notes.
//!
//! The crate is an internal library boundary with no wire format of its own:
//! - [`uid_assign`] stamps globally unique identifiers onto new events and
//!   their notes (codes come from the `etrack-uid` crate).
//! - [`context`] defines the immutable per-batch lookup bundle every check
//!   reads, plus the collaborator contracts it is loaded from.
//! - [`checks`] holds the polymorphic rule checks; [`pipeline`] runs them in
//!   order with short-circuit-on-final semantics.
//! - [`store`] is the persistence boundary admitted events are committed
//!   through; [`import`] ties the whole flow together per batch.
//!
//! **Not in this crate**: the relational schema and SQL, HTTP/CLI import
//! endpoints, role storage, and metadata loading. Those live behind the
//! collaborator traits defined here.

pub mod checks;
pub mod context;
pub mod dates;
pub mod error;
pub mod event;
pub mod import;
pub mod pipeline;
pub mod store;
pub mod summary;
pub mod uid_assign;

#[cfg(test)]
pub(crate) mod testutil;

pub use checks::{EnrollmentCheck, EventBaseCheck, ValidationCheck};
pub use context::{
    Enrollment, EnrollmentStatus, EnrollmentStore, ImportOptions, Program, TrackedEntityInstance,
    User, ValidationContext, F_EDIT_EXPIRED,
};
pub use error::{StoreError, StoreResult};
pub use event::{Event, EventStatus, Note};
pub use import::{EventImportService, ImportReport};
pub use pipeline::ValidationPipeline;
pub use store::{EventSearchParams, EventStore};
pub use summary::{ImportConflict, ImportCount, ImportStatus, ImportSummary};

// Identifier codes are re-exported for convenience.
pub use etrack_uid::{Uid, UidError};
