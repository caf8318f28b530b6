//! Field sanity and enrollment-completion checks.

use crate::checks::ValidationCheck;
use crate::context::{EnrollmentStatus, ValidationContext, F_EDIT_EXPIRED};
use crate::dates;
use crate::event::Event;
use crate::summary::{ImportConflict, ImportStatus, ImportSummary};
use chrono::Utc;

/// Temporal and field sanity check, plus the completed-enrollment lock.
///
/// Validates every client-supplied date field against the accepted date
/// grammar and, when the event's enrollment is completed, enforces that only
/// callers holding the [`F_EDIT_EXPIRED`] authority (or requests bound to no
/// user at all) may add events dated after the enrollment's end.
///
/// All failures found are accumulated into one summary; this check never
/// short-circuits internally and is not final, so date-format and
/// completion-lock conflicts can appear together without blocking later
/// checks.
pub struct EventBaseCheck;

impl ValidationCheck for EventBaseCheck {
    fn check(&self, event: &Event, ctx: &ValidationContext) -> ImportSummary {
        let errors = validate(event, ctx);
        if errors.is_empty() {
            return ImportSummary::new();
        }

        let mut summary = ImportSummary::new();
        summary.status = ImportStatus::Error;
        summary.conflicts = errors
            .into_iter()
            .map(|message| ImportConflict::new("Event", message))
            .collect();
        summary.increment_ignored()
    }

    fn is_final(&self) -> bool {
        false
    }
}

fn validate(event: &Event, ctx: &ValidationContext) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(due_date) = &event.due_date {
        if !dates::date_is_valid(due_date) {
            errors.push(format!("Invalid event due date: {}", due_date));
        }
    }

    if let Some(event_date) = &event.event_date {
        if !dates::date_is_valid(event_date) {
            errors.push(format!("Invalid event date: {}", event_date));
        }
    }

    if let Some(created_at_client) = &event.created_at_client {
        if !dates::date_is_valid(created_at_client) {
            errors.push(format!(
                "Invalid event created at client date: {}",
                created_at_client
            ));
        }
    }

    if let Some(last_updated_at_client) = &event.last_updated_at_client {
        if !dates::date_is_valid(last_updated_at_client) {
            errors.push(format!(
                "Invalid event last updated at client date: {}",
                last_updated_at_client
            ));
        }
    }

    // Completion lock. The loader contract guarantees a pre-resolved
    // enrollment for every event handed to this check; without one the lock
    // has nothing to apply to.
    let Some(enrollment) = ctx.enrollment(&event.uid) else {
        return errors;
    };

    if enrollment.status == EnrollmentStatus::Completed {
        match &ctx.import_options().user {
            None => return errors,
            Some(user) if user.is_authorized(F_EDIT_EXPIRED) => return errors,
            Some(_) => {}
        }

        let reference_date = event
            .created
            .as_deref()
            .and_then(dates::parse_date)
            .unwrap_or_else(|| Utc::now().naive_utc());

        if let Some(end_date) = enrollment.end_date {
            let reference_day = dates::truncate_to_day(reference_date);
            let end_day = dates::truncate_to_day(end_date);

            if reference_day > end_day {
                errors.push(format!(
                    "Not possible to add event to a completed enrollment. Event created date ( {} ) is after enrollment completed date ( {} ).",
                    reference_day, end_day
                ));
            }
        }
    }

    errors
}
