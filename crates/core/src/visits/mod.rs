//! Visits module - the visit record and its validation ranges.

mod visits_model;

#[cfg(test)]
mod visits_model_tests;

pub use visits_model::{
    format_temperature, NewVisit, RangeViolation, Visit, VitalField, VitalRange, VITAL_RANGES,
};
