//! Patient records: demographics, clinical annotations, and the owned bill.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ward_types::NonEmptyText;

use crate::billing::{Bill, BillSummary};

/// Stable identifier for a registered patient.
///
/// Assigned by the registry starting at 1, strictly increasing, never
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PatientId(u64);

impl PatientId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for PatientId {
    fn from(value: u64) -> Self {
        PatientId(value)
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id and name listing entry, in registration order.
#[derive(Debug, Clone, Serialize)]
pub struct PatientBrief {
    pub id: PatientId,
    pub name: NonEmptyText,
}

/// Demographic view of a patient, for basic presentation.
#[derive(Debug, Clone, Serialize)]
pub struct PatientBasic {
    pub id: PatientId,
    pub name: NonEmptyText,
    pub age: u32,
    pub gender: NonEmptyText,
    pub symptoms: NonEmptyText,
    pub admission_date: NonEmptyText,
}

/// Immutable view of a full patient record, including the bill.
#[derive(Debug, Clone, Serialize)]
pub struct PatientSnapshot {
    pub id: PatientId,
    pub name: NonEmptyText,
    pub age: u32,
    pub gender: NonEmptyText,
    pub symptoms: NonEmptyText,
    pub admission_date: NonEmptyText,
    pub registered_at: DateTime<Utc>,
    pub diagnoses: Vec<String>,
    pub notes: Vec<String>,
    pub prescriptions: Vec<String>,
    pub bill: BillSummary,
}

/// One patient's demographic data, clinical annotations, and bill.
///
/// Clinical lists are append-only: entries are never edited or removed.
/// Records themselves are never deleted.
#[derive(Debug)]
pub struct PatientRecord {
    id: PatientId,
    name: NonEmptyText,
    age: u32,
    gender: NonEmptyText,
    symptoms: NonEmptyText,
    admission_date: NonEmptyText,
    registered_at: DateTime<Utc>,
    diagnoses: Vec<String>,
    notes: Vec<String>,
    prescriptions: Vec<String>,
    bill: Bill,
}

impl PatientRecord {
    pub(crate) fn new(
        id: PatientId,
        name: NonEmptyText,
        age: u32,
        gender: NonEmptyText,
        symptoms: NonEmptyText,
        admission_date: NonEmptyText,
    ) -> Self {
        Self {
            id,
            name,
            age,
            gender,
            symptoms,
            admission_date,
            registered_at: Utc::now(),
            diagnoses: Vec::new(),
            notes: Vec::new(),
            prescriptions: Vec::new(),
            bill: Bill::default(),
        }
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    /// Appends a diagnosis. Empty text is ignored.
    pub fn add_diagnosis(&mut self, text: &str) {
        push_entry(&mut self.diagnoses, text);
    }

    /// Appends a medical note. Empty text is ignored.
    pub fn add_medical_note(&mut self, text: &str) {
        push_entry(&mut self.notes, text);
    }

    /// Appends a prescription. Empty text is ignored.
    pub fn add_prescription(&mut self, text: &str) {
        push_entry(&mut self.prescriptions, text);
    }

    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    /// The record's bill, for charge and payment mutation.
    pub fn bill_mut(&mut self) -> &mut Bill {
        &mut self.bill
    }

    /// Demographic view for basic presentation.
    pub fn basic(&self) -> PatientBasic {
        PatientBasic {
            id: self.id,
            name: self.name.clone(),
            age: self.age,
            gender: self.gender.clone(),
            symptoms: self.symptoms.clone(),
            admission_date: self.admission_date.clone(),
        }
    }

    /// Immutable view of every field for read-only presentation.
    pub fn snapshot(&self) -> PatientSnapshot {
        PatientSnapshot {
            id: self.id,
            name: self.name.clone(),
            age: self.age,
            gender: self.gender.clone(),
            symptoms: self.symptoms.clone(),
            admission_date: self.admission_date.clone(),
            registered_at: self.registered_at,
            diagnoses: self.diagnoses.clone(),
            notes: self.notes.clone(),
            prescriptions: self.prescriptions.clone(),
            bill: self.bill.summary(),
        }
    }
}

/// Appends trimmed text, preserving insertion order. No deduplication, no
/// size limit.
fn push_entry(entries: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    entries.push(trimmed.to_owned());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).expect("non-empty")
    }

    fn record() -> PatientRecord {
        PatientRecord::new(
            PatientId::from(1),
            text("Jane Doe"),
            30,
            text("Female"),
            text("Fever"),
            text("2026-08-07"),
        )
    }

    #[test]
    fn clinical_entries_preserve_insertion_order() {
        let mut patient = record();
        patient.add_diagnosis("Influenza");
        patient.add_diagnosis("Dehydration");
        patient.add_medical_note("Rest advised");
        patient.add_prescription("Oseltamivir 75mg");

        let snapshot = patient.snapshot();
        assert_eq!(snapshot.diagnoses, vec!["Influenza", "Dehydration"]);
        assert_eq!(snapshot.notes, vec!["Rest advised"]);
        assert_eq!(snapshot.prescriptions, vec!["Oseltamivir 75mg"]);
    }

    #[test]
    fn empty_clinical_text_is_ignored() {
        let mut patient = record();
        patient.add_diagnosis("");
        patient.add_medical_note("   ");
        patient.add_prescription("\t\n");

        let snapshot = patient.snapshot();
        assert!(snapshot.diagnoses.is_empty());
        assert!(snapshot.notes.is_empty());
        assert!(snapshot.prescriptions.is_empty());
    }

    #[test]
    fn duplicate_entries_are_kept() {
        let mut patient = record();
        patient.add_medical_note("Stable");
        patient.add_medical_note("Stable");
        assert_eq!(patient.snapshot().notes.len(), 2);
    }

    #[test]
    fn snapshot_includes_bill_state() {
        let mut patient = record();
        patient.bill_mut().add_charge(text("Consultation"), 100.0);

        let snapshot = patient.snapshot();
        assert_eq!(snapshot.bill.balance, 100.0);
        assert_eq!(snapshot.id, PatientId::from(1));
    }
}
