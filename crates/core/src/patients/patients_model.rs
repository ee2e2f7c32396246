//! Patient store domain models.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::hash_map::{Entry, HashMap};

use crate::errors::{Error, Result};
use crate::visits::Visit;

/// Patient identifier as it appears in the first field of a record line.
pub type PatientId = i64;

/// Which patients an aggregate covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatientScope {
    All,
    Patient(PatientId),
}

/// Rejects negative identifiers.
pub fn validate_patient_id(patient_id: PatientId) -> Result<PatientId> {
    if patient_id < 0 {
        return Err(Error::invalid_argument(format!(
            "patientId should be a non-negative integer, got {}",
            patient_id
        )));
    }
    Ok(patient_id)
}

/// Parses a patient identifier typed by a user.
pub fn parse_patient_id(input: &str) -> Result<PatientId> {
    let trimmed = input.trim();
    let patient_id = trimmed.parse::<PatientId>().map_err(|_| {
        Error::invalid_argument(format!(
            "patientId should be a non-negative integer, got '{}'",
            trimmed
        ))
    })?;
    validate_patient_id(patient_id)
}

/// In-memory mapping from patient to visits.
///
/// Patients iterate in the order they were first seen; each patient's visits
/// keep the order in which they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientStore {
    visits: HashMap<PatientId, Vec<Visit>>,
    order: Vec<PatientId>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn patient_count(&self) -> usize {
        self.order.len()
    }

    /// Total number of visits across all patients.
    pub fn visit_count(&self) -> usize {
        self.visits.values().map(Vec::len).sum()
    }

    pub fn contains_patient(&self, patient_id: PatientId) -> bool {
        self.visits.contains_key(&patient_id)
    }

    pub fn visits(&self, patient_id: PatientId) -> Option<&[Visit]> {
        self.visits.get(&patient_id).map(Vec::as_slice)
    }

    pub fn patients(&self) -> impl Iterator<Item = (PatientId, &[Visit])> {
        self.order.iter().filter_map(move |patient_id| {
            self.visits
                .get(patient_id)
                .map(|visits| (*patient_id, visits.as_slice()))
        })
    }

    /// Every visit paired with its patient, in store order.
    pub fn iter_visits(&self) -> impl Iterator<Item = (PatientId, &Visit)> {
        self.patients()
            .flat_map(|(patient_id, visits)| visits.iter().map(move |visit| (patient_id, visit)))
    }

    pub fn push_visit(&mut self, patient_id: PatientId, visit: Visit) {
        match self.visits.entry(patient_id) {
            Entry::Occupied(mut entry) => entry.get_mut().push(visit),
            Entry::Vacant(entry) => {
                entry.insert(vec![visit]);
                self.order.push(patient_id);
            }
        }
    }

    pub fn remove_patient(&mut self, patient_id: PatientId) -> Option<Vec<Visit>> {
        self.take_patient(patient_id).map(|(_, visits)| visits)
    }

    /// Removes a patient and reports the position it held.
    pub(crate) fn take_patient(&mut self, patient_id: PatientId) -> Option<(usize, Vec<Visit>)> {
        let visits = self.visits.remove(&patient_id)?;
        let position = self.order.iter().position(|id| *id == patient_id)?;
        self.order.remove(position);
        Some((position, visits))
    }

    /// Puts a patient taken with [`take_patient`](Self::take_patient) back
    /// at its old position.
    pub(crate) fn restore_patient(
        &mut self,
        position: usize,
        patient_id: PatientId,
        visits: Vec<Visit>,
    ) {
        if self.visits.insert(patient_id, visits).is_none() {
            self.order.insert(position.min(self.order.len()), patient_id);
        }
    }
}

impl Serialize for PatientStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.patients())
    }
}
