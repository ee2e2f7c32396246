//! Text rendering of visits, statistics and load diagnostics.

use std::io::{self, Write};

use vitals_core::ingest::LoadDiagnostic;
use vitals_core::patients::PatientId;
use vitals_core::queries::VitalStatistics;
use vitals_core::visits::{Visit, VitalField};

pub fn write_visit<W: Write>(out: &mut W, visit: &Visit) -> io::Result<()> {
    writeln!(out, " Visit Date: {}", visit.date())?;
    writeln!(
        out,
        "  Temperature: {:.2} {}",
        visit.temperature(),
        VitalField::Temperature.unit()
    )?;
    let readings = [
        ("Heart Rate", visit.heart_rate(), VitalField::HeartRate),
        (
            "Respiratory Rate",
            visit.respiratory_rate(),
            VitalField::RespiratoryRate,
        ),
        (
            "Systolic Blood Pressure",
            visit.systolic_bp(),
            VitalField::SystolicBp,
        ),
        (
            "Diastolic Blood Pressure",
            visit.diastolic_bp(),
            VitalField::DiastolicBp,
        ),
        (
            "Oxygen Saturation",
            visit.oxygen_saturation(),
            VitalField::OxygenSaturation,
        ),
    ];
    for (label, value, field) in readings {
        writeln!(out, "  {}: {} {}", label, value, field.unit())?;
    }
    Ok(())
}

pub fn write_patient_visits<W: Write>(
    out: &mut W,
    patient_id: PatientId,
    visits: &[Visit],
) -> io::Result<()> {
    writeln!(out, "Patient ID: {}", patient_id)?;
    for visit in visits {
        write_visit(out, visit)?;
    }
    Ok(())
}

/// One `Patient ID:` header per run of visits belonging to the same patient.
pub fn write_grouped_visits<W: Write>(
    out: &mut W,
    visits: &[(PatientId, &Visit)],
) -> io::Result<()> {
    let mut current = None;
    for (patient_id, visit) in visits {
        if current != Some(*patient_id) {
            writeln!(out, "Patient ID: {}", patient_id)?;
            current = Some(*patient_id);
        }
        write_visit(out, visit)?;
    }
    Ok(())
}

/// One `Patient ID:` header per visit, as date search results are shown.
pub fn write_visit_matches<W: Write>(
    out: &mut W,
    matches: &[(PatientId, &Visit)],
) -> io::Result<()> {
    for (patient_id, visit) in matches {
        writeln!(out, "Patient ID: {}", patient_id)?;
        write_visit(out, visit)?;
    }
    Ok(())
}

pub fn write_statistics<W: Write>(
    out: &mut W,
    heading: &str,
    stats: &VitalStatistics,
) -> io::Result<()> {
    writeln!(out, "{}", heading)?;
    let averages = [
        ("temperature", stats.temperature, VitalField::Temperature),
        ("heart rate", stats.heart_rate, VitalField::HeartRate),
        (
            "respiratory rate",
            stats.respiratory_rate,
            VitalField::RespiratoryRate,
        ),
        (
            "systolic blood pressure",
            stats.systolic_bp,
            VitalField::SystolicBp,
        ),
        (
            "diastolic blood pressure",
            stats.diastolic_bp,
            VitalField::DiastolicBp,
        ),
        (
            "oxygen saturation",
            stats.oxygen_saturation,
            VitalField::OxygenSaturation,
        ),
    ];
    for (label, value, field) in averages {
        writeln!(out, "  Average {}: {:.2} {}", label, value, field.unit())?;
    }
    Ok(())
}

pub fn write_diagnostics<W: Write>(out: &mut W, diagnostics: &[LoadDiagnostic]) -> io::Result<()> {
    for diagnostic in diagnostics {
        writeln!(out, "{}", diagnostic.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::ingest::load_store;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_visit_block() {
        let store = load_store("4,2023-05-01,36.5,72,16,120,80,98\n".as_bytes()).store;
        let visits = store.visits(4).unwrap();

        let text = render(|out| write_patient_visits(out, 4, visits));

        assert_eq!(
            text,
            "Patient ID: 4\n \
             Visit Date: 2023-05-01\n  \
             Temperature: 36.50 C\n  \
             Heart Rate: 72 bpm\n  \
             Respiratory Rate: 16 bpm\n  \
             Systolic Blood Pressure: 120 mmHg\n  \
             Diastolic Blood Pressure: 80 mmHg\n  \
             Oxygen Saturation: 98 %\n"
        );
    }

    #[test]
    fn test_grouped_visits_print_one_header_per_patient() {
        let store = load_store(
            "2,2023-01-01,36.5,72,16,120,80,98\n\
             1,2023-01-02,36.6,70,15,118,79,97\n\
             2,2023-01-03,36.7,74,17,122,81,99\n"
                .as_bytes(),
        )
        .store;
        let visits: Vec<(PatientId, &Visit)> = store.iter_visits().collect();

        let text = render(|out| write_grouped_visits(out, &visits));

        let headers: Vec<&str> = text.lines().filter(|l| l.starts_with("Patient ID")).collect();
        assert_eq!(headers, vec!["Patient ID: 2", "Patient ID: 1"]);
        assert_eq!(text.matches(" Visit Date:").count(), 3);
    }

    #[test]
    fn test_statistics_use_two_decimals() {
        let stats = VitalStatistics {
            visit_count: 3,
            temperature: 36.866666,
            heart_rate: 70.0,
            respiratory_rate: 15.5,
            systolic_bp: 118.333,
            diastolic_bp: 79.0,
            oxygen_saturation: 97.666,
        };

        let text = render(|out| write_statistics(out, "Vital Signs for Patient 1:", &stats));

        assert!(text.starts_with("Vital Signs for Patient 1:\n"));
        assert!(text.contains("  Average temperature: 36.87 C\n"));
        assert!(text.contains("  Average respiratory rate: 15.50 bpm\n"));
        assert!(text.contains("  Average systolic blood pressure: 118.33 mmHg\n"));
        assert!(text.contains("  Average oxygen saturation: 97.67 %\n"));
    }

    #[test]
    fn test_diagnostics_echo_messages() {
        let report = load_store("1,2023-01-01,36.5\n".as_bytes());

        let text = render(|out| write_diagnostics(out, &report.diagnostics));

        assert_eq!(
            text,
            "Invalid number of fields (3) in line: 1,2023-01-01,36.5\n"
        );
    }
}
