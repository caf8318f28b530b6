//! Shared fixtures for unit tests.

use crate::context::{
    Enrollment, EnrollmentStatus, EnrollmentStore, ImportOptions, Program, TrackedEntityInstance,
    ValidationContext,
};
use crate::dates;
use crate::event::Event;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory [`EnrollmentStore`] backed by plain maps.
#[derive(Default)]
pub(crate) struct MapEnrollmentStore {
    by_entity: HashMap<(String, String), Vec<Enrollment>>,
    by_program: HashMap<String, Vec<Enrollment>>,
}

impl MapEnrollmentStore {
    pub(crate) fn set_for_entity(
        &mut self,
        tracked_entity: &str,
        program: &str,
        enrollments: Vec<Enrollment>,
    ) {
        self.by_entity
            .insert((tracked_entity.into(), program.into()), enrollments);
    }

    pub(crate) fn set_for_program(&mut self, program: &str, enrollments: Vec<Enrollment>) {
        self.by_program.insert(program.into(), enrollments);
    }
}

impl EnrollmentStore for MapEnrollmentStore {
    fn find_active(&self, tracked_entity: &str, program: &str) -> Vec<Enrollment> {
        self.by_entity
            .get(&(tracked_entity.to_owned(), program.to_owned()))
            .cloned()
            .unwrap_or_default()
    }

    fn find_active_for_program(&self, program: &str) -> Vec<Enrollment> {
        self.by_program.get(program).cloned().unwrap_or_default()
    }
}

/// Builder mirroring [`ValidationContext::builder`] that also populates the
/// backing enrollment store.
pub(crate) struct TestContextBuilder {
    store: MapEnrollmentStore,
    programs: Vec<Program>,
    enrollments: Vec<(String, Enrollment)>,
    tracked_entities: Vec<(String, TrackedEntityInstance)>,
    options: ImportOptions,
}

impl TestContextBuilder {
    pub(crate) fn program(mut self, program: Program) -> Self {
        self.programs.push(program);
        self
    }

    pub(crate) fn enrollment(mut self, event_uid: impl Into<String>, e: Enrollment) -> Self {
        self.enrollments.push((event_uid.into(), e));
        self
    }

    pub(crate) fn tracked_entity(
        mut self,
        event_uid: impl Into<String>,
        instance: TrackedEntityInstance,
    ) -> Self {
        self.tracked_entities.push((event_uid.into(), instance));
        self
    }

    pub(crate) fn import_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn active_for_entity(
        mut self,
        tracked_entity: &str,
        program: &str,
        enrollments: Vec<Enrollment>,
    ) -> Self {
        self.store.set_for_entity(tracked_entity, program, enrollments);
        self
    }

    pub(crate) fn active_for_program(mut self, program: &str, enrollments: Vec<Enrollment>) -> Self {
        self.store.set_for_program(program, enrollments);
        self
    }

    pub(crate) fn build(self) -> ValidationContext {
        let mut builder = ValidationContext::builder(Arc::new(self.store));
        for program in self.programs {
            builder = builder.program(program);
        }
        for (event_uid, e) in self.enrollments {
            builder = builder.enrollment(event_uid, e);
        }
        for (event_uid, instance) in self.tracked_entities {
            builder = builder.tracked_entity(event_uid, instance);
        }
        builder.import_options(self.options).build()
    }
}

/// Builds a context through `configure`, starting from an empty store and no
/// lookup data.
pub(crate) fn context_with(
    configure: impl FnOnce(TestContextBuilder) -> TestContextBuilder,
) -> ValidationContext {
    configure(TestContextBuilder {
        store: MapEnrollmentStore::default(),
        programs: Vec::new(),
        enrollments: Vec::new(),
        tracked_entities: Vec::new(),
        options: ImportOptions::default(),
    })
    .build()
}

pub(crate) fn event(uid: &str, program: &str) -> Event {
    Event {
        uid: uid.into(),
        program: program.into(),
        program_stage: "stage1".into(),
        org_unit: "ou1".into(),
        ..Default::default()
    }
}

pub(crate) fn program(uid: &str, registration: bool) -> Program {
    Program {
        uid: uid.into(),
        name: format!("program {}", uid),
        registration,
    }
}

pub(crate) fn enrollment(uid: &str, program: &str) -> Enrollment {
    Enrollment {
        uid: uid.into(),
        program: program.into(),
        tracked_entity_instance: None,
        status: EnrollmentStatus::Active,
        end_date: None,
    }
}

pub(crate) fn completed_enrollment(uid: &str, program: &str, end_date: &str) -> Enrollment {
    Enrollment {
        uid: uid.into(),
        program: program.into(),
        tracked_entity_instance: None,
        status: EnrollmentStatus::Completed,
        end_date: Some(dates::parse_date(end_date).expect("test end date must parse")),
    }
}
