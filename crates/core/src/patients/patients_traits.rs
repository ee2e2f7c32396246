use super::patients_model::{PatientId, PatientScope, PatientStore};
use crate::errors::Result;
use crate::queries::{DateFilter, VitalStatistics};
use crate::visits::{NewVisit, Visit};

/// Destination for persisted visit lines.
pub trait VisitSink: Send + Sync {
    /// Replaces the persisted contents with every visit in `store`.
    fn replace_all(&self, store: &PatientStore) -> Result<()>;

    /// Adds one visit line after the existing contents.
    fn append(&self, patient_id: PatientId, visit: &Visit) -> Result<()>;
}

/// Trait defining the contract for patient record operations.
pub trait PatientServiceTrait {
    fn store(&self) -> &PatientStore;
    fn list_all(&self) -> Vec<(PatientId, &Visit)>;
    fn list_by_patient(&self, patient_id: PatientId) -> Result<&[Visit]>;
    fn compute_statistics(&self, scope: PatientScope) -> Result<Option<VitalStatistics>>;
    fn find_visits_by_date(&self, filter: DateFilter) -> Vec<(PatientId, &Visit)>;
    fn find_follow_up_candidates(&self) -> Vec<PatientId>;
    /// Removes every visit of a patient and rewrites storage.
    fn delete_all_visits(&mut self, patient_id: PatientId) -> Result<Vec<Visit>>;
    /// Validates, persists, then records a new visit.
    fn add_visit(&mut self, patient_id: PatientId, new_visit: NewVisit) -> Result<Visit>;
}
