//! Import verdict types.
//!
//! Every validation check and the pipeline itself report through an
//! [`ImportSummary`]: a status, an optional reference to the offending event,
//! an ordered list of [`ImportConflict`] entries, and running counters. A
//! summary with status [`ImportStatus::Error`] always means "not persisted".
//! Business-rule failures are values of this type, never Rust errors.

use serde::{Deserialize, Serialize};

/// Outcome status of one import summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStatus {
    #[default]
    Success,
    Error,
    Warning,
}

/// One structured validation failure: the object it concerns and a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConflict {
    /// Name of the field or object the conflict is about.
    pub object: String,
    /// Human-readable description, including the offending raw value where
    /// one exists.
    pub value: String,
}

impl ImportConflict {
    pub fn new(object: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            value: value.into(),
        }
    }
}

/// Running counters carried by a summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCount {
    pub imported: u32,
    pub updated: u32,
    pub ignored: u32,
    pub deleted: u32,
}

impl ImportCount {
    /// Adds another counter set into this one.
    pub fn merge(&mut self, other: &ImportCount) {
        self.imported += other.imported;
        self.updated += other.updated;
        self.ignored += other.ignored;
        self.deleted += other.deleted;
    }
}

/// Per-event verdict produced by validation checks and the pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub status: ImportStatus,
    /// Top-level failure description, when a single message covers the whole
    /// summary (the per-branch early-return checks report this way).
    pub description: Option<String>,
    /// Identifier of the event this summary is about.
    pub reference: Option<String>,
    /// Accumulated conflicts, in the order they were detected.
    pub conflicts: Vec<ImportConflict>,
    pub import_count: ImportCount,
}

impl ImportSummary {
    /// A successful, empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// An error summary carrying a single description.
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            status: ImportStatus::Error,
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Sets the offending event identifier.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Bumps the ignored counter by one.
    pub fn increment_ignored(mut self) -> Self {
        self.import_count.ignored += 1;
        self
    }

    /// Bumps the imported counter by one.
    pub fn increment_imported(mut self) -> Self {
        self.import_count.imported += 1;
        self
    }

    pub fn is_error(&self) -> bool {
        self.status == ImportStatus::Error
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}
