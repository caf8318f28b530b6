//! Registration-vs-enrollment cardinality check.

use crate::checks::ValidationCheck;
use crate::context::ValidationContext;
use crate::event::Event;
use crate::summary::ImportSummary;

/// Enrollment consistency check.
///
/// For registration programs every event must resolve to exactly one active
/// enrollment of its tracked entity; for non-registration programs at most one
/// active enrollment may exist for the program as a whole. Each failing branch
/// returns immediately with a single-description error summary rather than
/// accumulating further findings, so observable conflict counts stay at one
/// per rejected event.
pub struct EnrollmentCheck;

impl ValidationCheck for EnrollmentCheck {
    fn check(&self, event: &Event, ctx: &ValidationContext) -> ImportSummary {
        let Some(program) = ctx.program(&event.program) else {
            // The loader resolves programs before validation runs; an unknown
            // program here is a broken loader contract, reported rather than
            // panicked on.
            return ImportSummary::error(format!(
                "Event references unknown program: {}",
                event.program
            ))
            .with_reference(&event.uid)
            .increment_ignored();
        };

        if program.registration {
            // A pre-resolved enrollment means the pre-processing stage already
            // guaranteed exactly one match.
            if ctx.enrollment(&event.uid).is_some() {
                return ImportSummary::new();
            }

            let Some(tracked_entity) = ctx.tracked_entity(&event.uid) else {
                return ImportSummary::error(format!(
                    "No tracked entity instance found for event: {}",
                    event.uid
                ))
                .with_reference(&event.uid)
                .increment_ignored();
            };

            let enrollments = ctx
                .enrollment_store()
                .find_active(&tracked_entity.uid, &program.uid);

            if enrollments.is_empty() {
                return ImportSummary::error(format!(
                    "Tracked entity instance: {} is not enrolled in program: {}",
                    tracked_entity.uid, program.uid
                ))
                .with_reference(&event.uid)
                .increment_ignored();
            } else if enrollments.len() > 1 {
                return ImportSummary::error(format!(
                    "Tracked entity instance: {} has multiple active enrollments in program: {}",
                    tracked_entity.uid, program.uid
                ))
                .with_reference(&event.uid)
                .increment_ignored();
            }
        } else {
            let enrollments = ctx.enrollment_store().find_active_for_program(&program.uid);

            if enrollments.len() > 1 {
                return ImportSummary::error(format!(
                    "Multiple active program instances exists for program: {}",
                    program.uid
                ))
                .with_reference(&event.uid)
                .increment_ignored();
            }
        }

        ImportSummary::new()
    }

    fn is_final(&self) -> bool {
        false
    }
}
