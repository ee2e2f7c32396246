/// Number of comma-separated fields in one persisted visit line
pub const VISIT_FIELD_COUNT: usize = 8;

/// Date layout accepted when adding a visit
pub const VISIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Heart rate above this (bpm) calls for a follow-up
pub const FOLLOW_UP_HEART_RATE_HIGH: i64 = 100;

/// Heart rate below this (bpm) calls for a follow-up
pub const FOLLOW_UP_HEART_RATE_LOW: i64 = 60;

/// Systolic pressure above this (mmHg) calls for a follow-up
pub const FOLLOW_UP_SYSTOLIC_HIGH: i64 = 140;

/// Diastolic pressure above this (mmHg) calls for a follow-up
pub const FOLLOW_UP_DIASTOLIC_HIGH: i64 = 90;

/// Oxygen saturation below this (%) calls for a follow-up
pub const FOLLOW_UP_OXYGEN_SATURATION_LOW: i64 = 90;
