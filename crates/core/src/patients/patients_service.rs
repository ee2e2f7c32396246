use chrono::NaiveDate;
use log::{debug, error, info};
use std::sync::Arc;

use super::patients_model::{validate_patient_id, PatientId, PatientScope, PatientStore};
use super::patients_traits::{PatientServiceTrait, VisitSink};
use crate::constants::VISIT_DATE_FORMAT;
use crate::errors::{Error, Result, ValidationError};
use crate::ingest::format_new_visit_line;
use crate::queries::{self, DateFilter, VitalStatistics};
use crate::visits::{NewVisit, Visit};

/// Removes a patient and rewrites the remaining store to `sink`.
///
/// If the rewrite fails the patient is put back, so the store keeps matching
/// what is persisted, and the storage error is returned.
pub fn delete_all_visits(
    store: &mut PatientStore,
    patient_id: PatientId,
    sink: &dyn VisitSink,
) -> Result<Vec<Visit>> {
    let patient_id = validate_patient_id(patient_id)?;
    let (position, removed) = store
        .take_patient(patient_id)
        .ok_or(Error::PatientNotFound(patient_id))?;

    if let Err(e) = sink.replace_all(store) {
        error!(
            "Failed to rewrite storage after deleting patient {}: {}",
            patient_id, e
        );
        store.restore_patient(position, patient_id, removed);
        return Err(e);
    }

    info!(
        "Deleted {} visits of patient {}",
        removed.len(),
        patient_id
    );
    Ok(removed)
}

/// Validates a new visit, appends it to `sink`, then adds it to the store.
///
/// Range failures use the same message shape as ingestion, naming the line
/// that would have been written.
pub fn add_visit(
    store: &mut PatientStore,
    patient_id: PatientId,
    new_visit: NewVisit,
    sink: &dyn VisitSink,
) -> Result<Visit> {
    let patient_id = validate_patient_id(patient_id)?;

    let date = new_visit.date.trim();
    if NaiveDate::parse_from_str(date, VISIT_DATE_FORMAT).is_err() {
        return Err(ValidationError::InvalidDate(new_visit.date.clone()).into());
    }
    let new_visit = NewVisit {
        date: date.to_string(),
        ..new_visit
    };

    let line = format_new_visit_line(patient_id, &new_visit);
    let visit = Visit::try_from(new_visit).map_err(|violation| violation.into_error(line))?;

    if let Err(e) = sink.append(patient_id, &visit) {
        error!("Failed to persist visit for patient {}: {}", patient_id, e);
        return Err(e);
    }

    debug!("Visit on {} saved for patient {}", visit.date(), patient_id);
    store.push_visit(patient_id, visit.clone());
    Ok(visit)
}

/// Owns the store and its storage sink for the lifetime of a session.
pub struct PatientService {
    store: PatientStore,
    sink: Arc<dyn VisitSink>,
}

impl PatientService {
    pub fn new(store: PatientStore, sink: Arc<dyn VisitSink>) -> Self {
        PatientService { store, sink }
    }

    pub fn into_store(self) -> PatientStore {
        self.store
    }
}

impl PatientServiceTrait for PatientService {
    fn store(&self) -> &PatientStore {
        &self.store
    }

    fn list_all(&self) -> Vec<(PatientId, &Visit)> {
        queries::list_all(&self.store)
    }

    fn list_by_patient(&self, patient_id: PatientId) -> Result<&[Visit]> {
        queries::list_by_patient(&self.store, patient_id)
    }

    fn compute_statistics(&self, scope: PatientScope) -> Result<Option<VitalStatistics>> {
        queries::compute_statistics(&self.store, scope)
    }

    fn find_visits_by_date(&self, filter: DateFilter) -> Vec<(PatientId, &Visit)> {
        queries::find_visits_by_date(&self.store, filter)
    }

    fn find_follow_up_candidates(&self) -> Vec<PatientId> {
        queries::find_follow_up_candidates(&self.store)
    }

    fn delete_all_visits(&mut self, patient_id: PatientId) -> Result<Vec<Visit>> {
        delete_all_visits(&mut self.store, patient_id, self.sink.as_ref())
    }

    fn add_visit(&mut self, patient_id: PatientId, new_visit: NewVisit) -> Result<Visit> {
        add_visit(&mut self.store, patient_id, new_visit, self.sink.as_ref())
    }
}
