//! Patients module - the patient store, the storage seam, and mutations.

mod patients_model;
mod patients_service;
mod patients_traits;


pub use patients_model::{
    parse_patient_id, validate_patient_id, PatientId, PatientScope, PatientStore,
};
pub use patients_service::{add_visit, delete_all_visits, PatientService};
pub use patients_traits::{PatientServiceTrait, VisitSink};
