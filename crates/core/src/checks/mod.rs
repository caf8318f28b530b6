//! Business-rule checks run against each incoming event.
//!
//! Each check evaluates one rule family and reports through an
//! [`ImportSummary`]; the pipeline decides continuation, not the check. Checks
//! are pure with respect to their inputs: the event and the context are never
//! mutated, the returned summary is the only output.

mod base;
mod enrollment;

pub use base::EventBaseCheck;
pub use enrollment::EnrollmentCheck;

use crate::context::ValidationContext;
use crate::event::Event;
use crate::summary::ImportSummary;

/// One element of the validation pipeline.
pub trait ValidationCheck: Send + Sync {
    /// Evaluates this check's rule family against one event.
    fn check(&self, event: &Event, ctx: &ValidationContext) -> ImportSummary;

    /// Whether a conflict-bearing result from this check must halt the
    /// pipeline for the event (`true`), or merely be recorded while later
    /// checks still run (`false`).
    fn is_final(&self) -> bool;
}
