use log::{debug, warn};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use vitals_core::errors::{Error, Result, StorageError};
use vitals_core::ingest::{load_store_from_path, write_store, write_visit, LoadReport};
use vitals_core::patients::{PatientId, PatientStore, VisitSink};
use vitals_core::visits::Visit;

/// Visits persisted in a single text file.
///
/// Full rewrites go through a sibling `.tmp` file that is synced and then
/// renamed over the target, so readers see either the old or the new file.
#[derive(Debug)]
pub struct FileVisitRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileVisitRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file. Never fails; problems come back as diagnostics.
    pub fn load(&self) -> LoadReport {
        load_store_from_path(&self.path)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("visits"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(path: &Path, err: impl std::fmt::Display) -> Error {
        StorageError::io(path.display().to_string(), err).into()
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| Self::io_error(parent, e))
            }
            _ => Ok(()),
        }
    }

    fn write_temp(&self, temp_path: &Path, store: &PatientStore) -> Result<()> {
        let file = File::create(temp_path).map_err(|e| Self::io_error(temp_path, e))?;
        let mut writer = BufWriter::new(file);
        Self::encode_store(&mut writer, temp_path, store)?;
        let file = writer
            .into_inner()
            .map_err(|e| Self::io_error(temp_path, e.error()))?;
        file.sync_all().map_err(|e| Self::io_error(temp_path, e))
    }

    fn encode_store<W: Write>(writer: &mut W, path: &Path, store: &PatientStore) -> Result<()> {
        write_store(writer, store).map_err(|e| Self::io_error(path, e))
    }

    /// True when the file has content that does not end in a newline.
    fn missing_trailing_newline(file: &mut File) -> std::io::Result<bool> {
        if file.metadata()?.len() == 0 {
            return Ok(false);
        }
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        Ok(last[0] != b'\n')
    }
}

impl VisitSink for FileVisitRepository {
    fn replace_all(&self, store: &PatientStore) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Self::io_error(&self.path, "visit file lock poisoned"))?;
        self.ensure_parent_dir()?;

        let temp_path = self.temp_path();
        if let Err(e) = self.write_temp(&temp_path, store) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(
                    "Failed to remove temporary file {}: {}",
                    temp_path.display(),
                    cleanup
                );
            }
            return Err(e);
        }

        fs::rename(&temp_path, &self.path).map_err(|e| Self::io_error(&self.path, e))?;
        debug!(
            "Rewrote {} with {} visits",
            self.path.display(),
            store.visit_count()
        );
        Ok(())
    }

    fn append(&self, patient_id: PatientId, visit: &Visit) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Self::io_error(&self.path, "visit file lock poisoned"))?;
        self.ensure_parent_dir()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| Self::io_error(&self.path, e))?;
        let needs_newline =
            Self::missing_trailing_newline(&mut file).map_err(|e| Self::io_error(&self.path, e))?;

        let mut writer = BufWriter::new(file);
        if needs_newline {
            writeln!(writer).map_err(|e| Self::io_error(&self.path, e))?;
        }
        write_visit(&mut writer, patient_id, visit).map_err(|e| Self::io_error(&self.path, e))?;
        writer.flush().map_err(|e| Self::io_error(&self.path, e))?;

        debug!(
            "Appended visit on {} for patient {} to {}",
            visit.date(),
            patient_id,
            self.path.display()
        );
        Ok(())
    }
}
