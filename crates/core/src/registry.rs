//! In-memory patient registry.
//!
//! Records live in an id-keyed map, so every lookup is revalidated by id and
//! no caller ever holds a reference that a later registration could
//! invalidate.

use std::collections::BTreeMap;

use ward_types::NonEmptyText;

use crate::error::{WardError, WardResult};
use crate::patient::{PatientBrief, PatientId, PatientRecord};

/// Owns every patient record and assigns identifiers.
#[derive(Debug, Default)]
pub struct PatientRegistry {
    patients: BTreeMap<PatientId, PatientRecord>,
    last_id: u64,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and stores a record, returning the newly assigned id.
    ///
    /// Ids start at 1 and increase monotonically; they are never reused.
    /// Registration does not fail on valid inputs.
    pub fn register(
        &mut self,
        name: NonEmptyText,
        age: u32,
        gender: NonEmptyText,
        symptoms: NonEmptyText,
        admission_date: NonEmptyText,
    ) -> PatientId {
        self.last_id += 1;
        let id = PatientId::from(self.last_id);
        let record = PatientRecord::new(id, name, age, gender, symptoms, admission_date);
        self.patients.insert(id, record);
        tracing::info!(id = id.value(), "patient registered");
        id
    }

    /// Looks a patient up by id. Absence is a normal, reportable outcome.
    pub fn get(&self, id: PatientId) -> WardResult<&PatientRecord> {
        self.patients
            .get(&id)
            .ok_or(WardError::PatientNotFound(id.value()))
    }

    pub fn get_mut(&mut self, id: PatientId) -> WardResult<&mut PatientRecord> {
        self.patients
            .get_mut(&id)
            .ok_or(WardError::PatientNotFound(id.value()))
    }

    /// Id and name of every patient, in registration order.
    pub fn list_brief(&self) -> Vec<PatientBrief> {
        self.patients
            .values()
            .map(|p| PatientBrief {
                id: p.id(),
                name: p.name().clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).expect("non-empty")
    }

    fn register(registry: &mut PatientRegistry, name: &str) -> PatientId {
        registry.register(
            text(name),
            40,
            text("Male"),
            text("Cough"),
            text("2026-08-01"),
        )
    }

    #[test]
    fn ids_start_at_one_and_strictly_increase() {
        let mut registry = PatientRegistry::new();
        let first = register(&mut registry, "First");
        let second = register(&mut registry, "Second");
        let third = register(&mut registry, "Third");

        assert_eq!(first.value(), 1);
        assert!(first < second && second < third);
    }

    #[test]
    fn lookup_on_empty_registry_reports_not_found() {
        let registry = PatientRegistry::new();
        let err = registry
            .get(PatientId::from(999))
            .expect_err("expected missing patient");
        assert!(matches!(err, WardError::PatientNotFound(999)));
    }

    #[test]
    fn brief_listing_follows_registration_order() {
        let mut registry = PatientRegistry::new();
        register(&mut registry, "First");
        register(&mut registry, "Second");

        let brief = registry.list_brief();
        assert_eq!(brief.len(), 2);
        assert_eq!(brief[0].name.as_str(), "First");
        assert_eq!(brief[1].name.as_str(), "Second");
    }
}
