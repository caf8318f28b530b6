//! Per-batch validation context and the collaborator contracts it reads.
//!
//! A [`ValidationContext`] is an immutable lookup bundle built once per import
//! batch, before any event is checked, and handed by shared reference to every
//! check. It carries the resolved program definitions, enrollments
//! pre-resolved against incoming events, tracked entity instances, a live
//! handle to the enrollment store for on-demand lookups, and the caller's
//! import options.
//!
//! Building the context once at batch start and never mutating it afterwards
//! is what makes per-event validation safe to run concurrently: checks only
//! ever read from it (see [`crate::pipeline`]).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Authority granting edits to data in expired or completed enrollment
/// windows.
pub const F_EDIT_EXPIRED: &str = "F_EDIT_EXPIRED";

/// Authority marking a superuser; implies every other authority.
pub const F_ALL: &str = "ALL";

/// Program definition, as resolved by the external metadata loader.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub uid: String,
    pub name: String,
    /// Registration programs require an explicit tracked-entity enrollment per
    /// event; non-registration programs share a single implicit enrollment.
    pub registration: bool,
}

/// Lifecycle status of an enrollment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Cancelled,
}

/// A tracked entity's (or program's) participation record in a program.
///
/// A completed enrollment closes the window for new events unless the caller
/// holds the [`F_EDIT_EXPIRED`] override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub uid: String,
    pub program: String,
    /// Absent for non-registration programs.
    pub tracked_entity_instance: Option<String>,
    pub status: EnrollmentStatus,
    /// Set when the enrollment was completed or cancelled.
    pub end_date: Option<NaiveDateTime>,
}

/// The subject enrolled in a program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEntityInstance {
    pub uid: String,
}

/// The acting user bound to an import request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub authorities: HashSet<String>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authorities: HashSet::new(),
        }
    }

    /// Grants an authority, builder style.
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authorities.insert(authority.into());
        self
    }

    /// Capability test: does this user hold `authority`?
    ///
    /// The superuser authority [`F_ALL`] implies everything.
    pub fn is_authorized(&self, authority: &str) -> bool {
        self.authorities.contains(authority) || self.authorities.contains(F_ALL)
    }
}

/// Caller-supplied options for one import request.
///
/// The validation pipeline only reads the bound user's authorization set; the
/// remaining flags are passed through to the surrounding import flow.
#[derive(Clone, Debug, Default)]
pub struct ImportOptions {
    /// The acting user, when the request is bound to one.
    pub user: Option<User>,
    /// Validate and report without committing to the event store.
    pub dry_run: bool,
    /// Pass-through synchronization skip flag.
    pub skip_sync: bool,
}

/// Live handle to the enrollment store, consulted when the context holds no
/// pre-resolved enrollment for an event.
///
/// Calls may block on the external store; the pipeline bounds its worker count
/// for that reason rather than fanning out per event.
pub trait EnrollmentStore: Send + Sync {
    /// Active enrollments of `tracked_entity` in `program`.
    fn find_active(&self, tracked_entity: &str, program: &str) -> Vec<Enrollment>;

    /// Active enrollments in `program`, regardless of tracked entity.
    fn find_active_for_program(&self, program: &str) -> Vec<Enrollment>;
}

/// Immutable, pre-populated lookup bundle handed to every validation check.
///
/// Constructed via [`ValidationContext::builder`] once per batch and discarded
/// at batch end. The enrollment and tracked-entity maps are keyed by *event*
/// identifier: they hold what the external loader pre-resolved for each
/// incoming event.
#[derive(Clone)]
pub struct ValidationContext {
    programs: HashMap<String, Program>,
    enrollments: HashMap<String, Enrollment>,
    tracked_entities: HashMap<String, TrackedEntityInstance>,
    enrollment_store: Arc<dyn EnrollmentStore>,
    import_options: ImportOptions,
}

impl ValidationContext {
    /// Starts building a context over the given live enrollment store.
    pub fn builder(enrollment_store: Arc<dyn EnrollmentStore>) -> ValidationContextBuilder {
        ValidationContextBuilder {
            programs: HashMap::new(),
            enrollments: HashMap::new(),
            tracked_entities: HashMap::new(),
            enrollment_store,
            import_options: ImportOptions::default(),
        }
    }

    /// The program definition for `program_uid`, if the loader resolved one.
    pub fn program(&self, program_uid: &str) -> Option<&Program> {
        self.programs.get(program_uid)
    }

    /// The enrollment pre-resolved for the event `event_uid`, if any.
    pub fn enrollment(&self, event_uid: &str) -> Option<&Enrollment> {
        self.enrollments.get(event_uid)
    }

    /// The tracked entity instance pre-resolved for the event `event_uid`.
    pub fn tracked_entity(&self, event_uid: &str) -> Option<&TrackedEntityInstance> {
        self.tracked_entities.get(event_uid)
    }

    /// Live enrollment store for on-demand lookups.
    pub fn enrollment_store(&self) -> &dyn EnrollmentStore {
        self.enrollment_store.as_ref()
    }

    pub fn import_options(&self) -> &ImportOptions {
        &self.import_options
    }
}

/// Builder for [`ValidationContext`], used by the external batch loader.
pub struct ValidationContextBuilder {
    programs: HashMap<String, Program>,
    enrollments: HashMap<String, Enrollment>,
    tracked_entities: HashMap<String, TrackedEntityInstance>,
    enrollment_store: Arc<dyn EnrollmentStore>,
    import_options: ImportOptions,
}

impl ValidationContextBuilder {
    /// Registers a resolved program definition, keyed by its own identifier.
    pub fn program(mut self, program: Program) -> Self {
        self.programs.insert(program.uid.clone(), program);
        self
    }

    /// Registers an enrollment pre-resolved for the event `event_uid`.
    pub fn enrollment(mut self, event_uid: impl Into<String>, enrollment: Enrollment) -> Self {
        self.enrollments.insert(event_uid.into(), enrollment);
        self
    }

    /// Registers a tracked entity instance pre-resolved for the event
    /// `event_uid`.
    pub fn tracked_entity(
        mut self,
        event_uid: impl Into<String>,
        instance: TrackedEntityInstance,
    ) -> Self {
        self.tracked_entities.insert(event_uid.into(), instance);
        self
    }

    pub fn import_options(mut self, options: ImportOptions) -> Self {
        self.import_options = options;
        self
    }

    /// Freezes the bundle. Nothing can be added after this point.
    pub fn build(self) -> ValidationContext {
        ValidationContext {
            programs: self.programs,
            enrollments: self.enrollments,
            tracked_entities: self.tracked_entities,
            enrollment_store: self.enrollment_store,
            import_options: self.import_options,
        }
    }
}
