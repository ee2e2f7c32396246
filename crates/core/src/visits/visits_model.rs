//! Visit domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    FOLLOW_UP_DIASTOLIC_HIGH, FOLLOW_UP_HEART_RATE_HIGH, FOLLOW_UP_HEART_RATE_LOW,
    FOLLOW_UP_OXYGEN_SATURATION_LOW, FOLLOW_UP_SYSTOLIC_HIGH,
};
use crate::errors::ValidationError;

/// The six numeric vital signs recorded at each visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VitalField {
    Temperature,
    HeartRate,
    RespiratoryRate,
    SystolicBp,
    DiastolicBp,
    OxygenSaturation,
}

impl VitalField {
    pub fn unit(&self) -> &'static str {
        match self {
            VitalField::Temperature => "C",
            VitalField::HeartRate => "bpm",
            VitalField::RespiratoryRate => "bpm",
            VitalField::SystolicBp | VitalField::DiastolicBp => "mmHg",
            VitalField::OxygenSaturation => "%",
        }
    }
}

impl fmt::Display for VitalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VitalField::Temperature => "temperature",
            VitalField::HeartRate => "heart rate",
            VitalField::RespiratoryRate => "respiratory rate",
            VitalField::SystolicBp => "systolic blood pressure",
            VitalField::DiastolicBp => "diastolic blood pressure",
            VitalField::OxygenSaturation => "oxygen saturation",
        };
        f.write_str(name)
    }
}

/// Inclusive range of accepted values for one vital sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalRange {
    pub field: VitalField,
    pub min: f64,
    pub max: f64,
}

impl VitalRange {
    /// NaN and infinities are never contained.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Accepted ranges, in the order checks are applied.
pub const VITAL_RANGES: [VitalRange; 6] = [
    VitalRange {
        field: VitalField::Temperature,
        min: 35.0,
        max: 42.0,
    },
    VitalRange {
        field: VitalField::HeartRate,
        min: 30.0,
        max: 180.0,
    },
    VitalRange {
        field: VitalField::RespiratoryRate,
        min: 5.0,
        max: 40.0,
    },
    VitalRange {
        field: VitalField::SystolicBp,
        min: 70.0,
        max: 200.0,
    },
    VitalRange {
        field: VitalField::DiastolicBp,
        min: 40.0,
        max: 120.0,
    },
    VitalRange {
        field: VitalField::OxygenSaturation,
        min: 70.0,
        max: 100.0,
    },
];

/// Formats a temperature in its shortest exact form, always keeping a
/// fractional part (`37.0`, `36.55`).
pub fn format_temperature(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// First range check a candidate visit failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeViolation {
    pub field: VitalField,
    pub value: String,
}

impl RangeViolation {
    /// Attaches the offending line, giving the ingestion diagnostic shape.
    pub fn into_error(self, line: impl Into<String>) -> ValidationError {
        ValidationError::OutOfRange {
            field: self.field,
            value: self.value,
            line: line.into(),
        }
    }
}

/// Input model for a visit that has not been range-checked yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVisit {
    pub date: String,
    pub temperature: f64,
    pub heart_rate: i64,
    pub respiratory_rate: i64,
    pub systolic_bp: i64,
    pub diastolic_bp: i64,
    pub oxygen_saturation: i64,
}

impl NewVisit {
    fn value_of(&self, field: VitalField) -> f64 {
        match field {
            VitalField::Temperature => self.temperature,
            VitalField::HeartRate => self.heart_rate as f64,
            VitalField::RespiratoryRate => self.respiratory_rate as f64,
            VitalField::SystolicBp => self.systolic_bp as f64,
            VitalField::DiastolicBp => self.diastolic_bp as f64,
            VitalField::OxygenSaturation => self.oxygen_saturation as f64,
        }
    }

    fn display_value_of(&self, field: VitalField) -> String {
        match field {
            VitalField::Temperature => format_temperature(self.temperature),
            VitalField::HeartRate => self.heart_rate.to_string(),
            VitalField::RespiratoryRate => self.respiratory_rate.to_string(),
            VitalField::SystolicBp => self.systolic_bp.to_string(),
            VitalField::DiastolicBp => self.diastolic_bp.to_string(),
            VitalField::OxygenSaturation => self.oxygen_saturation.to_string(),
        }
    }

    /// Applies every range check in order, stopping at the first failure.
    pub fn check_ranges(&self) -> Result<(), RangeViolation> {
        for range in VITAL_RANGES.iter() {
            if !range.contains(self.value_of(range.field)) {
                return Err(RangeViolation {
                    field: range.field,
                    value: self.display_value_of(range.field),
                });
            }
        }
        Ok(())
    }
}

/// A validated visit. Only obtainable through [`Visit::try_from`], so every
/// stored visit is within range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    date: String,
    temperature: f64,
    heart_rate: i64,
    respiratory_rate: i64,
    systolic_bp: i64,
    diastolic_bp: i64,
    oxygen_saturation: i64,
}

impl TryFrom<NewVisit> for Visit {
    type Error = RangeViolation;

    fn try_from(new_visit: NewVisit) -> Result<Self, Self::Error> {
        new_visit.check_ranges()?;
        Ok(Visit {
            date: new_visit.date,
            temperature: new_visit.temperature,
            heart_rate: new_visit.heart_rate,
            respiratory_rate: new_visit.respiratory_rate,
            systolic_bp: new_visit.systolic_bp,
            diastolic_bp: new_visit.diastolic_bp,
            oxygen_saturation: new_visit.oxygen_saturation,
        })
    }
}

impl Visit {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn heart_rate(&self) -> i64 {
        self.heart_rate
    }

    pub fn respiratory_rate(&self) -> i64 {
        self.respiratory_rate
    }

    pub fn systolic_bp(&self) -> i64 {
        self.systolic_bp
    }

    pub fn diastolic_bp(&self) -> i64 {
        self.diastolic_bp
    }

    pub fn oxygen_saturation(&self) -> i64 {
        self.oxygen_saturation
    }

    /// True when any vital breaches a follow-up threshold.
    pub fn needs_follow_up(&self) -> bool {
        self.heart_rate > FOLLOW_UP_HEART_RATE_HIGH
            || self.heart_rate < FOLLOW_UP_HEART_RATE_LOW
            || self.systolic_bp > FOLLOW_UP_SYSTOLIC_HIGH
            || self.diastolic_bp > FOLLOW_UP_DIASTOLIC_HIGH
            || self.oxygen_saturation < FOLLOW_UP_OXYGEN_SATURATION_LOW
    }
}
