//! Visit file codec.
//!
//! Each line holds one visit as eight comma-separated fields:
//! `patientId,date,temperature,heartRate,respiratoryRate,systolicBP,diastolicBP,oxygenSaturation`.
//! There is no header row and no quoting. Loading never fails as a whole:
//! malformed lines are skipped with a diagnostic and read failures keep
//! whatever was loaded before them.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use super::ingest_model::{LoadDiagnostic, LoadReport};
use crate::constants::VISIT_FIELD_COUNT;
use crate::errors::{StorageError, ValidationError};
use crate::patients::{PatientId, PatientStore};
use crate::visits::{format_temperature, NewVisit, Visit};

/// Field layout of one record line.
#[derive(Debug, Deserialize)]
struct VisitRow {
    patient_id: PatientId,
    date: String,
    temperature: f64,
    heart_rate: i64,
    respiratory_rate: i64,
    systolic_bp: i64,
    diastolic_bp: i64,
    oxygen_saturation: i64,
}

impl VisitRow {
    fn into_parts(self) -> (PatientId, NewVisit) {
        (
            self.patient_id,
            NewVisit {
                date: self.date,
                temperature: self.temperature,
                heart_rate: self.heart_rate,
                respiratory_rate: self.respiratory_rate,
                systolic_bp: self.systolic_bp,
                diastolic_bp: self.diastolic_bp,
                oxygen_saturation: self.oxygen_saturation,
            },
        )
    }
}

/// Loads a store from any readable source.
pub fn load_store<R: Read>(source: R) -> LoadReport {
    read_visits(source, "input stream")
}

/// Loads a store from a file. A missing or unreadable file yields an empty
/// store and a storage diagnostic.
pub fn load_store_from_path(path: impl AsRef<Path>) -> LoadReport {
    let path = path.as_ref();
    let path_display = path.display().to_string();

    match File::open(path) {
        Ok(file) => read_visits(file, &path_display),
        Err(e) => {
            let err = if e.kind() == io::ErrorKind::NotFound {
                StorageError::SourceNotFound(path_display)
            } else {
                StorageError::io(path_display, e)
            };
            warn!("{}", err);
            LoadReport {
                store: PatientStore::new(),
                diagnostics: vec![LoadDiagnostic::storage(&err)],
            }
        }
    }
}

fn read_visits<R: Read>(source: R, source_name: &str) -> LoadReport {
    let mut fields = ReaderBuilder::new();
    fields
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All);

    let mut reader = BufReader::new(source);
    let mut report = LoadReport::default();
    let mut buf = Vec::new();
    let mut line_number: u64 = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                line_number += 1;
                let parsed = match std::str::from_utf8(&buf) {
                    Ok(text) if text.trim().is_empty() => continue,
                    Ok(text) => parse_line(&fields, text.trim()),
                    Err(_) => Err(ValidationError::InvalidType {
                        line: String::from_utf8_lossy(&buf).trim().to_string(),
                    }),
                };
                match parsed {
                    Ok((patient_id, visit)) => report.store.push_visit(patient_id, visit),
                    Err(err) => {
                        debug!("Skipping line {}: {}", line_number, err);
                        report
                            .diagnostics
                            .push(LoadDiagnostic::rejected_line(Some(line_number), &err));
                    }
                }
            }
            Err(e) => {
                let err = StorageError::io(
                    source_name,
                    format!(
                        "An unexpected error occurred while reading the file: {}",
                        e
                    ),
                );
                warn!("{} (after line {})", err, line_number);
                report.diagnostics.push(LoadDiagnostic::storage(&err));
                break;
            }
        }
    }

    info!(
        "Loaded {} visits for {} patients from {} ({} lines rejected)",
        report.store.visit_count(),
        report.store.patient_count(),
        source_name,
        report.rejected_lines()
    );
    report
}

/// Converts one trimmed, non-empty line into a validated visit.
fn parse_line(
    fields: &ReaderBuilder,
    line: &str,
) -> std::result::Result<(PatientId, Visit), ValidationError> {
    let mut record = StringRecord::new();
    fields
        .from_reader(line.as_bytes())
        .read_record(&mut record)
        .map_err(|_| ValidationError::InvalidType {
            line: line.to_string(),
        })?;

    if record.len() != VISIT_FIELD_COUNT {
        return Err(ValidationError::FieldCount {
            found: record.len(),
            line: line.to_string(),
        });
    }

    let row: VisitRow = record
        .deserialize(None)
        .map_err(|_| ValidationError::InvalidType {
            line: line.to_string(),
        })?;
    let (patient_id, new_visit) = row.into_parts();
    let visit = Visit::try_from(new_visit).map_err(|violation| violation.into_error(line))?;
    Ok((patient_id, visit))
}

/// Renders a stored visit as one record line, without a line terminator.
pub fn format_visit_line(patient_id: PatientId, visit: &Visit) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        patient_id,
        visit.date(),
        format_temperature(visit.temperature()),
        visit.heart_rate(),
        visit.respiratory_rate(),
        visit.systolic_bp(),
        visit.diastolic_bp(),
        visit.oxygen_saturation()
    )
}

/// Renders a not-yet-validated visit the way it would be persisted.
pub fn format_new_visit_line(patient_id: PatientId, new_visit: &NewVisit) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        patient_id,
        new_visit.date,
        format_temperature(new_visit.temperature),
        new_visit.heart_rate,
        new_visit.respiratory_rate,
        new_visit.systolic_bp,
        new_visit.diastolic_bp,
        new_visit.oxygen_saturation
    )
}

/// Writes one visit line.
pub fn write_visit<W: Write>(
    writer: &mut W,
    patient_id: PatientId,
    visit: &Visit,
) -> io::Result<()> {
    writeln!(writer, "{}", format_visit_line(patient_id, visit))
}

/// Writes every visit of every patient in store order.
pub fn write_store<W: Write>(writer: &mut W, store: &PatientStore) -> io::Result<()> {
    for (patient_id, visit) in store.iter_visits() {
        write_visit(writer, patient_id, visit)?;
    }
    writer.flush()
}
