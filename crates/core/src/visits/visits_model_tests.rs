//! Tests for Visit domain models.

#[cfg(test)]
mod tests {
    use crate::visits::visits_model::*;

    fn normal_visit() -> NewVisit {
        NewVisit {
            date: "2023-04-12".to_string(),
            temperature: 36.8,
            heart_rate: 72,
            respiratory_rate: 16,
            systolic_bp: 120,
            diastolic_bp: 80,
            oxygen_saturation: 98,
        }
    }

    // ============================================================================
    // Range Validation Tests
    // ============================================================================

    #[test]
    fn test_normal_visit_passes_all_ranges() {
        let visit = Visit::try_from(normal_visit()).unwrap();
        assert_eq!(visit.date(), "2023-04-12");
        assert_eq!(visit.temperature(), 36.8);
        assert_eq!(visit.heart_rate(), 72);
        assert_eq!(visit.respiratory_rate(), 16);
        assert_eq!(visit.systolic_bp(), 120);
        assert_eq!(visit.diastolic_bp(), 80);
        assert_eq!(visit.oxygen_saturation(), 98);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let low = NewVisit {
            temperature: 35.0,
            heart_rate: 30,
            respiratory_rate: 5,
            systolic_bp: 70,
            diastolic_bp: 40,
            oxygen_saturation: 70,
            ..normal_visit()
        };
        assert!(low.check_ranges().is_ok());

        let high = NewVisit {
            temperature: 42.0,
            heart_rate: 180,
            respiratory_rate: 40,
            systolic_bp: 200,
            diastolic_bp: 120,
            oxygen_saturation: 100,
            ..normal_visit()
        };
        assert!(high.check_ranges().is_ok());
    }

    #[test]
    fn test_each_field_rejected_outside_range() {
        let cases = [
            (
                NewVisit {
                    temperature: 42.1,
                    ..normal_visit()
                },
                VitalField::Temperature,
                "42.1",
            ),
            (
                NewVisit {
                    heart_rate: 29,
                    ..normal_visit()
                },
                VitalField::HeartRate,
                "29",
            ),
            (
                NewVisit {
                    respiratory_rate: 41,
                    ..normal_visit()
                },
                VitalField::RespiratoryRate,
                "41",
            ),
            (
                NewVisit {
                    systolic_bp: 69,
                    ..normal_visit()
                },
                VitalField::SystolicBp,
                "69",
            ),
            (
                NewVisit {
                    diastolic_bp: 121,
                    ..normal_visit()
                },
                VitalField::DiastolicBp,
                "121",
            ),
            (
                NewVisit {
                    oxygen_saturation: 101,
                    ..normal_visit()
                },
                VitalField::OxygenSaturation,
                "101",
            ),
        ];

        for (candidate, field, value) in cases {
            let violation = candidate.check_ranges().unwrap_err();
            assert_eq!(violation.field, field);
            assert_eq!(violation.value, value);
        }
    }

    #[test]
    fn test_first_failing_check_wins() {
        let candidate = NewVisit {
            temperature: 50.0,
            heart_rate: 500,
            oxygen_saturation: 10,
            ..normal_visit()
        };
        let violation = Visit::try_from(candidate).unwrap_err();
        assert_eq!(violation.field, VitalField::Temperature);
        assert_eq!(violation.value, "50.0");
    }

    #[test]
    fn test_nan_temperature_is_rejected() {
        let candidate = NewVisit {
            temperature: f64::NAN,
            ..normal_visit()
        };
        let violation = candidate.check_ranges().unwrap_err();
        assert_eq!(violation.field, VitalField::Temperature);
    }

    #[test]
    fn test_range_violation_into_error_message() {
        let violation = RangeViolation {
            field: VitalField::OxygenSaturation,
            value: "65".to_string(),
        };
        let err = violation.into_error("4,2023-01-01,36.5,80,16,120,80,65");
        assert_eq!(
            err.to_string(),
            "Invalid oxygen saturation value (65) in line: 4,2023-01-01,36.5,80,16,120,80,65"
        );
    }

    // ============================================================================
    // Follow-up Threshold Tests
    // ============================================================================

    #[test]
    fn test_needs_follow_up_thresholds() {
        let normal = Visit::try_from(normal_visit()).unwrap();
        assert!(!normal.needs_follow_up());

        let breaches = [
            NewVisit {
                heart_rate: 101,
                ..normal_visit()
            },
            NewVisit {
                heart_rate: 59,
                ..normal_visit()
            },
            NewVisit {
                systolic_bp: 141,
                ..normal_visit()
            },
            NewVisit {
                diastolic_bp: 91,
                ..normal_visit()
            },
            NewVisit {
                oxygen_saturation: 89,
                ..normal_visit()
            },
        ];
        for candidate in breaches {
            assert!(Visit::try_from(candidate).unwrap().needs_follow_up());
        }
    }

    #[test]
    fn test_follow_up_boundaries_are_exclusive() {
        let edge = Visit::try_from(NewVisit {
            heart_rate: 100,
            systolic_bp: 140,
            diastolic_bp: 90,
            oxygen_saturation: 90,
            ..normal_visit()
        })
        .unwrap();
        assert!(!edge.needs_follow_up());

        let low_edge = Visit::try_from(NewVisit {
            heart_rate: 60,
            ..normal_visit()
        })
        .unwrap();
        assert!(!low_edge.needs_follow_up());
    }

    // ============================================================================
    // Formatting and Serialization Tests
    // ============================================================================

    #[test]
    fn test_format_temperature_keeps_fraction() {
        assert_eq!(format_temperature(37.0), "37.0");
        assert_eq!(format_temperature(36.55), "36.55");
        assert_eq!(format_temperature(f64::NAN), "NaN");
    }

    #[test]
    fn test_vital_field_names_and_units() {
        assert_eq!(VitalField::SystolicBp.to_string(), "systolic blood pressure");
        assert_eq!(VitalField::SystolicBp.unit(), "mmHg");
        assert_eq!(VitalField::Temperature.unit(), "C");
        assert_eq!(VitalField::OxygenSaturation.unit(), "%");
    }

    #[test]
    fn test_vital_field_serialization() {
        let json = serde_json::to_string(&VitalField::HeartRate).unwrap();
        assert_eq!(json, r#""HEART_RATE""#);
        let field: VitalField = serde_json::from_str(r#""OXYGEN_SATURATION""#).unwrap();
        assert_eq!(field, VitalField::OxygenSaturation);
    }

    #[test]
    fn test_visit_serializes_camel_case() {
        let visit = Visit::try_from(normal_visit()).unwrap();
        let value = serde_json::to_value(&visit).unwrap();
        assert_eq!(value["heartRate"], 72);
        assert_eq!(value["oxygenSaturation"], 98);
        assert_eq!(value["date"], "2023-04-12");
    }
}
