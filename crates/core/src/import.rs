//! Batch import of externally submitted events.
//!
//! This is the flow tying the core together: identifier assignment, the
//! validation pipeline, and the single hand-off of admitted events to the
//! event store. Results are accumulated in a local buffer and only returned
//! once the whole batch has completed or failed, so a cancelled or failed
//! import leaves no partially committed state observable to the caller.

use crate::context::ValidationContext;
use crate::error::StoreResult;
use crate::event::Event;
use crate::pipeline::ValidationPipeline;
use crate::store::EventStore;
use crate::summary::{ImportCount, ImportSummary};
use crate::uid_assign;

/// Outcome of one import batch: a summary per submitted event, in submission
/// order, plus totals across the batch.
#[derive(Clone, Debug, Default)]
pub struct ImportReport {
    pub summaries: Vec<ImportSummary>,
    pub counts: ImportCount,
}

/// Imports batches of externally submitted events.
///
/// Owned by the surrounding service layer; one instance is shared across
/// requests. The worker bound limits concurrent validation (and therefore
/// concurrent fallthrough lookups against the enrollment store) without
/// unbounded fan-out.
pub struct EventImportService<S: EventStore> {
    store: S,
    pipeline: ValidationPipeline,
    workers: usize,
}

impl<S: EventStore> EventImportService<S> {
    /// Creates a service over `store` with the given check pipeline and
    /// validation worker bound (clamped to at least one).
    pub fn new(store: S, pipeline: ValidationPipeline, workers: usize) -> Self {
        Self {
            store,
            pipeline,
            workers: workers.max(1),
        }
    }

    /// Imports one batch of events against a pre-built context.
    ///
    /// Flow: stamp identifiers onto every event and note, validate each event
    /// through the pipeline, then hand all admitted events to the store as
    /// one unit. Rejected events surface their aggregate summaries and never
    /// reach storage. Under dry-run import options the store insert is
    /// skipped but summaries and counters are produced as if it had run.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the commit fails; in that case no
    /// report is produced.
    pub fn import(
        &self,
        mut events: Vec<Event>,
        ctx: &ValidationContext,
    ) -> StoreResult<ImportReport> {
        uid_assign::assign_uids(&mut events);

        let summaries = if self.workers > 1 {
            self.pipeline
                .validate_batch_parallel(&events, ctx, self.workers)
        } else {
            self.pipeline.validate_batch(&events, ctx)
        };

        let mut report_summaries = Vec::with_capacity(events.len());
        let mut admitted = Vec::new();

        for (event, summary) in events.into_iter().zip(summaries) {
            if summary.is_error() || summary.has_conflicts() {
                tracing::debug!(
                    event = %event.uid,
                    conflicts = summary.conflicts.len(),
                    "event rejected by validation"
                );
                report_summaries.push(summary);
            } else {
                report_summaries.push(summary.increment_imported());
                admitted.push(event);
            }
        }

        if !admitted.is_empty() {
            if ctx.import_options().dry_run {
                tracing::debug!(count = admitted.len(), "dry run, skipping event store commit");
            } else {
                let inserted = self.store.insert(&admitted)?;
                if inserted != admitted.len() {
                    tracing::warn!(
                        expected = admitted.len(),
                        inserted,
                        "event store reported fewer inserts than admitted events"
                    );
                }
            }
        }

        let mut counts = ImportCount::default();
        for summary in &report_summaries {
            counts.merge(&summary.import_count);
        }

        Ok(ImportReport {
            summaries: report_summaries,
            counts,
        })
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ImportOptions;
    use crate::error::{StoreError, StoreResult};
    use crate::event::Note;
    use crate::store::{EventRow, EventSearchParams, GridRow};
    use crate::summary::ImportStatus;
    use crate::testutil::{context_with, enrollment, event, program};
    use std::sync::Mutex;

    /// Minimal in-memory event store for exercising the import flow.
    #[derive(Default)]
    struct MemoryEventStore {
        events: Mutex<Vec<Event>>,
        fail_insert: bool,
    }

    impl MemoryEventStore {
        fn stored(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventStore for MemoryEventStore {
        fn insert(&self, events: &[Event]) -> StoreResult<usize> {
            if self.fail_insert {
                return Err(StoreError::Rejected("insert disabled".into()));
            }
            let mut guard = self.events.lock().unwrap();
            guard.extend_from_slice(events);
            Ok(events.len())
        }

        fn delete(&self, uids: &[String]) -> StoreResult<()> {
            let mut guard = self.events.lock().unwrap();
            guard.retain(|e| !uids.contains(&e.uid));
            Ok(())
        }

        fn events(&self, _params: &EventSearchParams) -> StoreResult<Vec<Event>> {
            Ok(self.stored())
        }

        fn event_rows(&self, _params: &EventSearchParams) -> StoreResult<Vec<EventRow>> {
            Ok(Vec::new())
        }

        fn event_grid(&self, _params: &EventSearchParams) -> StoreResult<Vec<GridRow>> {
            Ok(Vec::new())
        }

        fn count(&self, _params: &EventSearchParams) -> StoreResult<usize> {
            Ok(self.stored().len())
        }
    }

    fn service(store: MemoryEventStore) -> EventImportService<MemoryEventStore> {
        EventImportService::new(store, ValidationPipeline::standard(), 1)
    }

    #[test]
    fn test_mixed_batch_persists_only_admitted_events() {
        let good = event("", "prog1");
        let mut bad = event("", "prog1");
        bad.due_date = Some("bogus".into());

        // Identifiers are regenerated on import, so pre-resolved maps keyed
        // by event uid cannot apply; resolve through the live store instead.
        let ctx = context_with(|b| {
            b.program(program("prog1", false))
                .active_for_program("prog1", vec![enrollment("enr1", "prog1")])
        });

        let svc = service(MemoryEventStore::default());
        let report = svc.import(vec![good, bad], &ctx).unwrap();

        assert_eq!(report.summaries.len(), 2);
        assert_eq!(report.summaries[0].status, ImportStatus::Success);
        assert_eq!(report.summaries[1].status, ImportStatus::Error);
        assert_eq!(report.counts.imported, 1);
        assert_eq!(report.counts.ignored, 1);

        let stored = svc.store().stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(Some(stored[0].uid.as_str()), report.summaries[0].reference.as_deref());
    }

    #[test]
    fn test_identifiers_are_assigned_before_validation() {
        let mut e = event("keepmenot01", "prog1");
        e.notes.push(Note {
            uid: "aQ3kxB71dWm".into(),
            value: "kept".into(),
            ..Default::default()
        });

        let ctx = context_with(|b| {
            b.program(program("prog1", false))
                .active_for_program("prog1", vec![enrollment("enr1", "prog1")])
        });

        let svc = service(MemoryEventStore::default());
        let report = svc.import(vec![e], &ctx).unwrap();

        let stored = svc.store().stored();
        assert_ne!(stored[0].uid, "keepmenot01");
        assert!(etrack_uid::Uid::is_valid(&stored[0].uid));
        assert_eq!(stored[0].notes[0].uid, "aQ3kxB71dWm");
        assert_eq!(
            report.summaries[0].reference.as_deref(),
            Some(stored[0].uid.as_str())
        );
    }

    #[test]
    fn test_store_failure_surfaces_and_leaves_no_report() {
        let ctx = context_with(|b| {
            b.program(program("prog1", false))
                .active_for_program("prog1", vec![enrollment("enr1", "prog1")])
        });

        let svc = service(MemoryEventStore {
            fail_insert: true,
            ..Default::default()
        });

        let result = svc.import(vec![event("", "prog1")], &ctx);

        assert!(matches!(result, Err(StoreError::Rejected(_))));
        assert!(svc.store().stored().is_empty());
    }

    #[test]
    fn test_dry_run_skips_commit_but_reports() {
        let ctx = context_with(|b| {
            b.program(program("prog1", false))
                .active_for_program("prog1", vec![enrollment("enr1", "prog1")])
                .import_options(ImportOptions {
                    dry_run: true,
                    ..Default::default()
                })
        });

        let svc = service(MemoryEventStore::default());
        let report = svc.import(vec![event("", "prog1")], &ctx).unwrap();

        assert_eq!(report.counts.imported, 1);
        assert!(svc.store().stored().is_empty());
    }

    #[test]
    fn test_fully_rejected_batch_never_touches_store() {
        // No enrollment anywhere: registration program events are rejected
        // by the enrollment check.
        let ctx = context_with(|b| b.program(program("prog1", true)));

        let svc = service(MemoryEventStore::default());
        let report = svc
            .import(vec![event("", "prog1"), event("", "prog1")], &ctx)
            .unwrap();

        assert_eq!(report.counts.imported, 0);
        assert_eq!(report.counts.ignored, 2);
        assert!(svc.store().stored().is_empty());
    }

    #[test]
    fn test_delete_cascades_by_uid() {
        let ctx = context_with(|b| {
            b.program(program("prog1", false))
                .active_for_program("prog1", vec![enrollment("enr1", "prog1")])
        });

        let svc = service(MemoryEventStore::default());
        let report = svc
            .import(vec![event("", "prog1"), event("", "prog1")], &ctx)
            .unwrap();

        let first_uid = report.summaries[0].reference.clone().unwrap();
        svc.store().delete(&[first_uid.clone()]).unwrap();

        let remaining = svc.store().stored();
        assert_eq!(remaining.len(), 1);
        assert_ne!(remaining[0].uid, first_uid);
    }
}
