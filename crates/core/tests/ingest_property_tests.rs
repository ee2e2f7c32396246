//! Property-based integration tests for visit ingestion.
//!
//! These tests check that loading keeps every valid line, drops every
//! malformed one, and that writing a store back out reproduces it.

use proptest::prelude::*;
use vitals_core::ingest::{format_new_visit_line, load_store, write_store, DiagnosticKind};
use vitals_core::patients::{PatientId, PatientStore};
use vitals_core::queries::{find_visits_by_date, DateFilter};
use vitals_core::visits::{NewVisit, Visit};

// =============================================================================
// Generators
// =============================================================================

/// Generates a visit whose vitals are all within range.
fn arb_valid_visit() -> impl Strategy<Value = NewVisit> {
    (
        2018i32..2026,
        1u32..=12,
        1u32..=28,
        350u32..=420, // temperature in tenths
        30i64..=180,
        5i64..=40,
        70i64..=200,
        40i64..=120,
        70i64..=100,
    )
        .prop_map(|(year, month, day, temp, hr, rr, sbp, dbp, spo2)| NewVisit {
            date: format!("{:04}-{:02}-{:02}", year, month, day),
            temperature: temp as f64 / 10.0,
            heart_rate: hr,
            respiratory_rate: rr,
            systolic_bp: sbp,
            diastolic_bp: dbp,
            oxygen_saturation: spo2,
        })
}

fn arb_valid_line() -> impl Strategy<Value = (PatientId, NewVisit)> {
    (0i64..20, arb_valid_visit())
}

/// A line that must be rejected, tagged with the diagnostic it should raise.
#[derive(Debug, Clone)]
enum BadLine {
    MissingField(String),
    NotNumeric(String),
    OutOfRange(String),
}

fn arb_bad_line() -> impl Strategy<Value = BadLine> {
    (arb_valid_line(), 0usize..3, 181i64..400).prop_map(|((id, visit), kind, high)| {
        let line = format_new_visit_line(id, &visit);
        match kind {
            0 => {
                let truncated = line.rsplit_once(',').map(|(head, _)| head).unwrap_or("");
                BadLine::MissingField(truncated.to_string())
            }
            1 => BadLine::NotNumeric(format!(
                "{},{},abc,{},{},{},{},{}",
                id,
                visit.date,
                visit.heart_rate,
                visit.respiratory_rate,
                visit.systolic_bp,
                visit.diastolic_bp,
                visit.oxygen_saturation
            )),
            _ => BadLine::OutOfRange(format_new_visit_line(
                id,
                &NewVisit {
                    heart_rate: high,
                    ..visit
                },
            )),
        }
    })
}

fn expected_store(lines: &[(PatientId, NewVisit)]) -> PatientStore {
    let mut store = PatientStore::new();
    for (id, visit) in lines {
        store.push_visit(*id, Visit::try_from(visit.clone()).unwrap());
    }
    store
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every valid line becomes exactly one visit, fields mapped by position.
    #[test]
    fn prop_valid_lines_are_all_loaded(lines in proptest::collection::vec(arb_valid_line(), 0..40)) {
        let content: String = lines
            .iter()
            .map(|(id, visit)| format!("{}\n", format_new_visit_line(*id, visit)))
            .collect();

        let report = load_store(content.as_bytes());

        prop_assert!(report.diagnostics.is_empty());
        prop_assert_eq!(report.store.visit_count(), lines.len());
        prop_assert_eq!(report.store, expected_store(&lines));
    }

    /// Malformed lines are dropped without disturbing valid ones.
    #[test]
    fn prop_invalid_lines_are_excluded(
        good in proptest::collection::vec(arb_valid_line(), 0..20),
        bad in proptest::collection::vec(arb_bad_line(), 1..10),
    ) {
        let mut content = String::new();
        let mut good_iter = good.iter();
        for bad_line in &bad {
            if let Some((id, visit)) = good_iter.next() {
                content.push_str(&format_new_visit_line(*id, visit));
                content.push('\n');
            }
            let text = match bad_line {
                BadLine::MissingField(t) | BadLine::NotNumeric(t) | BadLine::OutOfRange(t) => t,
            };
            content.push_str(text);
            content.push('\n');
        }
        for (id, visit) in good_iter {
            content.push_str(&format_new_visit_line(*id, visit));
            content.push('\n');
        }

        let report = load_store(content.as_bytes());

        prop_assert_eq!(report.store, expected_store(&good));
        prop_assert_eq!(report.diagnostics.len(), bad.len());
        for (diagnostic, bad_line) in report.diagnostics.iter().zip(&bad) {
            let expected_kind = match bad_line {
                BadLine::MissingField(_) => DiagnosticKind::FieldCount,
                BadLine::NotNumeric(_) => DiagnosticKind::InvalidType,
                BadLine::OutOfRange(_) => DiagnosticKind::OutOfRange,
            };
            prop_assert_eq!(diagnostic.kind, expected_kind);
        }
    }

    /// Writing a store and loading it again gives back the same store.
    #[test]
    fn prop_write_then_load_round_trips(lines in proptest::collection::vec(arb_valid_line(), 0..40)) {
        let store = expected_store(&lines);
        let mut out = Vec::new();
        write_store(&mut out, &store).unwrap();

        let report = load_store(out.as_slice());

        prop_assert!(report.diagnostics.is_empty());
        prop_assert_eq!(report.store, store);
    }

    /// A year filter returns exactly the visits dated in that year.
    #[test]
    fn prop_year_filter_matches_prefix(
        lines in proptest::collection::vec(arb_valid_line(), 0..40),
        year in 2018i32..2026,
    ) {
        let store = expected_store(&lines);
        let prefix = format!("{}-", year);

        let found = find_visits_by_date(&store, DateFilter::new(Some(year), None));

        prop_assert!(found.iter().all(|(_, visit)| visit.date().starts_with(&prefix)));
        let expected = store
            .iter_visits()
            .filter(|(_, visit)| visit.date().starts_with(&prefix))
            .count();
        prop_assert_eq!(found.len(), expected);
    }
}
