//! Per-field averages of the numeric vitals.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::patients::{validate_patient_id, PatientScope, PatientStore};
use crate::visits::Visit;

/// Arithmetic means of the six numeric vitals over `visit_count` visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalStatistics {
    pub visit_count: usize,
    pub temperature: f64,
    pub heart_rate: f64,
    pub respiratory_rate: f64,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub oxygen_saturation: f64,
}

#[derive(Default)]
struct VitalTotals {
    count: usize,
    temperature: f64,
    heart_rate: i64,
    respiratory_rate: i64,
    systolic_bp: i64,
    diastolic_bp: i64,
    oxygen_saturation: i64,
}

impl VitalTotals {
    fn add(&mut self, visit: &Visit) {
        self.count += 1;
        self.temperature += visit.temperature();
        self.heart_rate += visit.heart_rate();
        self.respiratory_rate += visit.respiratory_rate();
        self.systolic_bp += visit.systolic_bp();
        self.diastolic_bp += visit.diastolic_bp();
        self.oxygen_saturation += visit.oxygen_saturation();
    }

    fn averages(&self) -> Option<VitalStatistics> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(VitalStatistics {
            visit_count: self.count,
            temperature: self.temperature / n,
            heart_rate: self.heart_rate as f64 / n,
            respiratory_rate: self.respiratory_rate as f64 / n,
            systolic_bp: self.systolic_bp as f64 / n,
            diastolic_bp: self.diastolic_bp as f64 / n,
            oxygen_saturation: self.oxygen_saturation as f64 / n,
        })
    }
}

/// Averages over all patients or one patient.
///
/// Across all patients the divisor is the total number of visits, so every
/// visit weighs the same. Returns `Ok(None)` when there is nothing to average.
pub fn compute_statistics(
    store: &PatientStore,
    scope: PatientScope,
) -> Result<Option<VitalStatistics>> {
    let mut totals = VitalTotals::default();

    match scope {
        PatientScope::All => {
            for (_, visit) in store.iter_visits() {
                totals.add(visit);
            }
        }
        PatientScope::Patient(patient_id) => {
            let patient_id = validate_patient_id(patient_id)?;
            let visits = store
                .visits(patient_id)
                .ok_or(Error::PatientNotFound(patient_id))?;
            for visit in visits {
                totals.add(visit);
            }
        }
    }

    Ok(totals.averages())
}
