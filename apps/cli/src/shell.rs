//! Numbered-menu session over any line source and sink.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::{debug, warn};
use vitals_core::errors::Error;
use vitals_core::patients::{parse_patient_id, PatientId, PatientScope, PatientServiceTrait};
use vitals_core::queries::DateFilter;
use vitals_core::visits::NewVisit;

use crate::render;

const MENU: &str = "\n\nWelcome to the Health Information System\n\n\
                    1. Display all patient data\n\
                    2. Display patient data by ID\n\
                    3. Add patient data\n\
                    4. Display patient statistics\n\
                    5. Find visits by year, month, or both\n\
                    6. Find patients who need follow-up\n\
                    7. Delete all visits of a particular patient\n\
                    8. Quit\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    DisplayAll,
    DisplayPatient,
    AddVisit,
    Statistics,
    FindByDate,
    FollowUp,
    DeletePatient,
    Quit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::DisplayAll),
            "2" => Some(Self::DisplayPatient),
            "3" => Some(Self::AddVisit),
            "4" => Some(Self::Statistics),
            "5" => Some(Self::FindByDate),
            "6" => Some(Self::FollowUp),
            "7" => Some(Self::DeletePatient),
            "8" => Some(Self::Quit),
            _ => None,
        }
    }
}

fn describe(err: &Error) -> String {
    match err {
        Error::Validation(inner) => inner.to_string(),
        Error::InvalidArgument(message) => message.clone(),
        other => other.to_string(),
    }
}

fn parse_number<T: FromStr>(input: &str) -> Result<T, String> {
    input
        .trim()
        .parse::<T>()
        .map_err(|_| format!("'{}' is not a valid number", input.trim()))
}

/// `0` means "any".
fn parse_optional<T: FromStr + Default + PartialEq>(input: &str) -> Result<Option<T>, String> {
    let value = parse_number::<T>(input)?;
    Ok((value != T::default()).then_some(value))
}

pub struct Shell<R, W, S> {
    input: R,
    output: W,
    service: S,
}

impl<R: BufRead, W: Write, S: PatientServiceTrait> Shell<R, W, S> {
    pub fn new(input: R, output: W, service: S) -> Self {
        Self {
            input,
            output,
            service,
        }
    }

    pub fn into_service(self) -> S {
        self.service
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Enter your choice (1-8): ")? else {
                break;
            };
            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice. Please try again.\n")?;
                continue;
            };
            debug!("Menu choice {:?}", choice);

            let keep_going = match choice {
                MenuChoice::DisplayAll => self.display_all(),
                MenuChoice::DisplayPatient => self.display_patient(),
                MenuChoice::AddVisit => self.add_visit(),
                MenuChoice::Statistics => self.statistics(),
                MenuChoice::FindByDate => self.find_by_date(),
                MenuChoice::FollowUp => self.follow_up(),
                MenuChoice::DeletePatient => self.delete_patient(),
                MenuChoice::Quit => {
                    writeln!(self.output, "Goodbye!")?;
                    break;
                }
            }?;
            if !keep_going {
                break;
            }
        }
        self.output.flush()
    }

    /// Reads one line. `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Re-prompts until `parse` accepts the answer.
    fn prompt_until<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => writeln!(self.output, "Error: {}. Please try again.", message)?,
            }
        }
    }

    fn prompt_patient_id(&mut self, message: &str) -> io::Result<Option<PatientId>> {
        self.prompt_until(message, |s| {
            parse_patient_id(s).map_err(|e| describe(&e))
        })
    }

    fn display_all(&mut self) -> io::Result<bool> {
        let visits = self.service.list_all();
        if visits.is_empty() {
            writeln!(self.output, "No patient data found.")?;
        } else {
            render::write_grouped_visits(&mut self.output, &visits)?;
        }
        Ok(true)
    }

    fn display_patient(&mut self) -> io::Result<bool> {
        let Some(patient_id) = self.prompt_patient_id("Enter patient ID: ")? else {
            return Ok(false);
        };
        match self.service.list_by_patient(patient_id) {
            Ok(visits) => render::write_patient_visits(&mut self.output, patient_id, visits)?,
            Err(e) => writeln!(self.output, "{}.", describe(&e))?,
        }
        Ok(true)
    }

    fn add_visit(&mut self) -> io::Result<bool> {
        let Some(patient_id) = self.prompt_patient_id("Enter patient ID: ")? else {
            return Ok(false);
        };
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
            return Ok(false);
        };
        let Some(temperature) =
            self.prompt_until("Enter temperature (Celsius): ", parse_number::<f64>)?
        else {
            return Ok(false);
        };
        let mut readings = [0i64; 5];
        let prompts = [
            "Enter heart rate (bpm): ",
            "Enter respiratory rate (breaths per minute): ",
            "Enter systolic blood pressure (mmHg): ",
            "Enter diastolic blood pressure (mmHg): ",
            "Enter oxygen saturation (%): ",
        ];
        for (slot, message) in readings.iter_mut().zip(prompts) {
            let Some(value) = self.prompt_until(message, parse_number::<i64>)? else {
                return Ok(false);
            };
            *slot = value;
        }
        let [heart_rate, respiratory_rate, systolic_bp, diastolic_bp, oxygen_saturation] =
            readings;

        let new_visit = NewVisit {
            date: date.trim().to_string(),
            temperature,
            heart_rate,
            respiratory_rate,
            systolic_bp,
            diastolic_bp,
            oxygen_saturation,
        };
        match self.service.add_visit(patient_id, new_visit) {
            Ok(_) => writeln!(
                self.output,
                "Visit is saved successfully for Patient #{}",
                patient_id
            )?,
            Err(e) => {
                warn!("Visit for patient {} rejected: {}", patient_id, e);
                writeln!(self.output, "Error: {}", describe(&e))?;
            }
        }
        Ok(true)
    }

    fn statistics(&mut self) -> io::Result<bool> {
        let Some(patient_id) =
            self.prompt_patient_id("Enter patient ID (or '0' for all patients): ")?
        else {
            return Ok(false);
        };
        let (scope, heading) = if patient_id == 0 {
            (
                PatientScope::All,
                "Average vital signs for all patients:".to_string(),
            )
        } else {
            (
                PatientScope::Patient(patient_id),
                format!("Vital Signs for Patient {}:", patient_id),
            )
        };
        match self.service.compute_statistics(scope) {
            Ok(Some(stats)) => render::write_statistics(&mut self.output, &heading, &stats)?,
            Ok(None) => writeln!(self.output, "No patient data found.")?,
            Err(e) => writeln!(self.output, "{}.", describe(&e))?,
        }
        Ok(true)
    }

    fn find_by_date(&mut self) -> io::Result<bool> {
        let Some(year) = self.prompt_until(
            "Enter year (YYYY) (or 0 for all years): ",
            parse_optional::<i32>,
        )?
        else {
            return Ok(false);
        };
        let Some(month) = self.prompt_until(
            "Enter month (MM) (or 0 for all months): ",
            parse_optional::<u32>,
        )?
        else {
            return Ok(false);
        };

        let matches = self.service.find_visits_by_date(DateFilter::new(year, month));
        if matches.is_empty() {
            writeln!(self.output, "No visits found for the specified year/month.")?;
        } else {
            render::write_visit_matches(&mut self.output, &matches)?;
        }
        Ok(true)
    }

    fn follow_up(&mut self) -> io::Result<bool> {
        let candidates = self.service.find_follow_up_candidates();
        if candidates.is_empty() {
            writeln!(self.output, "No patients found who need follow-up visits.")?;
            return Ok(true);
        }
        writeln!(self.output, "Patients who need follow-up visits:")?;
        for patient_id in candidates {
            writeln!(self.output, "{}", patient_id)?;
        }
        Ok(true)
    }

    fn delete_patient(&mut self) -> io::Result<bool> {
        let Some(patient_id) = self.prompt_patient_id("Enter patient ID: ")? else {
            return Ok(false);
        };
        match self.service.delete_all_visits(patient_id) {
            Ok(_) => writeln!(
                self.output,
                "Data for patient {} has been deleted.",
                patient_id
            )?,
            Err(Error::PatientNotFound(_)) => writeln!(
                self.output,
                "No data found for patient with ID {}",
                patient_id
            )?,
            Err(e) => {
                warn!("Deleting patient {} failed: {}", patient_id, e);
                writeln!(self.output, "Error: {}", describe(&e))?;
            }
        }
        Ok(true)
    }
}
