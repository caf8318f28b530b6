//! Ordered validation pipeline.
//!
//! The pipeline holds a caller-defined, ordered list of checks and runs each
//! incoming event through them, merging conflict-bearing results into one
//! aggregate summary per event. A failing check marked final stops the run
//! for that event; a failing non-final check is recorded and the pipeline
//! moves on. Field and date checks should generally precede consistency
//! checks so malformed-input diagnostics survive even when enrollment
//! resolution later fails.
//!
//! Validation holds no per-event state and only reads the shared, immutable
//! [`ValidationContext`], so a batch can be split across a bounded set of
//! worker threads with no coordination beyond building the context first.

use crate::checks::{EnrollmentCheck, EventBaseCheck, ValidationCheck};
use crate::context::ValidationContext;
use crate::event::Event;
use crate::summary::{ImportStatus, ImportSummary};
use std::thread;

/// Runs one event through an ordered list of checks.
pub struct ValidationPipeline {
    checks: Vec<Box<dyn ValidationCheck>>,
}

impl ValidationPipeline {
    /// Builds a pipeline over the given checks; order is significant and
    /// preserved.
    pub fn new(checks: Vec<Box<dyn ValidationCheck>>) -> Self {
        Self { checks }
    }

    /// The shipped check list: field/date sanity first, then enrollment
    /// consistency.
    pub fn standard() -> Self {
        Self::new(vec![Box::new(EventBaseCheck), Box::new(EnrollmentCheck)])
    }

    /// Validates one event, returning the aggregate summary.
    ///
    /// Conflicts accumulate across checks; `ERROR` dominates the merged
    /// status, `WARNING` dominates `SUCCESS`. The first failure description
    /// encountered is kept. Ignored counters add up, one increment per
    /// failing check.
    pub fn validate(&self, event: &Event, ctx: &ValidationContext) -> ImportSummary {
        let mut aggregate = ImportSummary::new().with_reference(&event.uid);

        for check in &self.checks {
            let summary = check.check(event, ctx);

            if summary.is_error() || summary.has_conflicts() {
                aggregate.conflicts.extend(summary.conflicts);
                aggregate.import_count.merge(&summary.import_count);
                if aggregate.description.is_none() {
                    aggregate.description = summary.description;
                }
                match summary.status {
                    ImportStatus::Error => aggregate.status = ImportStatus::Error,
                    ImportStatus::Warning if aggregate.status == ImportStatus::Success => {
                        aggregate.status = ImportStatus::Warning;
                    }
                    _ => {}
                }

                if check.is_final() {
                    tracing::debug!(
                        event = %event.uid,
                        "final check failed, halting validation for event"
                    );
                    break;
                }
            }
        }

        aggregate
    }

    /// Validates a batch of events sequentially. Results are per-event
    /// independent and returned in input order.
    pub fn validate_batch(&self, events: &[Event], ctx: &ValidationContext) -> Vec<ImportSummary> {
        events.iter().map(|event| self.validate(event, ctx)).collect()
    }

    /// Validates a batch of events across at most `workers` threads.
    ///
    /// Events are split into contiguous chunks, one per worker, so the store
    /// never sees more than `workers` concurrent fallthrough lookups. Results
    /// are returned in input order and are identical to a sequential run:
    /// validation never mutates shared state.
    pub fn validate_batch_parallel(
        &self,
        events: &[Event],
        ctx: &ValidationContext,
        workers: usize,
    ) -> Vec<ImportSummary> {
        let workers = workers.max(1).min(events.len());
        if workers <= 1 {
            return self.validate_batch(events, ctx);
        }

        let chunk_size = events.len().div_ceil(workers);

        thread::scope(|scope| {
            let handles: Vec<_> = events
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|event| self.validate(event, ctx))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut summaries = Vec::with_capacity(events.len());
            for handle in handles {
                match handle.join() {
                    Ok(chunk_summaries) => summaries.extend(chunk_summaries),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
            summaries
        })
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
