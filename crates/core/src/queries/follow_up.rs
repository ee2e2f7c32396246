use crate::patients::{PatientId, PatientStore};

/// Patients with at least one visit breaching a follow-up threshold, each
/// listed once, in store order.
pub fn find_follow_up_candidates(store: &PatientStore) -> Vec<PatientId> {
    store
        .patients()
        .filter(|(_, visits)| visits.iter().any(|visit| visit.needs_follow_up()))
        .map(|(patient_id, _)| patient_id)
        .collect()
}
