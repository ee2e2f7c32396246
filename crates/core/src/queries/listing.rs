use crate::errors::{Error, Result};
use crate::patients::{validate_patient_id, PatientId, PatientStore};
use crate::visits::Visit;

/// Every visit of every patient, in store order.
pub fn list_all(store: &PatientStore) -> Vec<(PatientId, &Visit)> {
    store.iter_visits().collect()
}

/// Visits of one patient in encounter order.
pub fn list_by_patient(store: &PatientStore, patient_id: PatientId) -> Result<&[Visit]> {
    let patient_id = validate_patient_id(patient_id)?;
    match store.visits(patient_id) {
        Some(visits) if !visits.is_empty() => Ok(visits),
        _ => Err(Error::PatientNotFound(patient_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::load_store;

    fn sample_store() -> PatientStore {
        load_store(
            "2,2023-01-01,36.5,72,16,120,80,98\n\
             1,2023-01-02,36.6,70,15,118,79,97\n\
             2,2023-01-03,36.7,74,17,122,81,99\n"
                .as_bytes(),
        )
        .store
    }

    #[test]
    fn test_list_all_groups_patients_in_first_seen_order() {
        let store = sample_store();
        let listed: Vec<(PatientId, &str)> = list_all(&store)
            .into_iter()
            .map(|(id, visit)| (id, visit.date()))
            .collect();
        assert_eq!(
            listed,
            vec![(2, "2023-01-01"), (2, "2023-01-03"), (1, "2023-01-02")]
        );
    }

    #[test]
    fn test_list_all_empty_store() {
        assert!(list_all(&PatientStore::new()).is_empty());
    }

    #[test]
    fn test_list_by_patient() {
        let store = sample_store();
        let visits = list_by_patient(&store, 2).unwrap();
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[1].date(), "2023-01-03");
    }

    #[test]
    fn test_list_by_patient_not_found() {
        let store = sample_store();
        assert!(matches!(
            list_by_patient(&store, 42),
            Err(Error::PatientNotFound(42))
        ));
    }

    #[test]
    fn test_list_by_patient_negative_id() {
        let store = sample_store();
        assert!(matches!(
            list_by_patient(&store, -1),
            Err(Error::InvalidArgument(_))
        ));
    }
}
