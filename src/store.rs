//! Flat-file submission table.
//!
//! The whole table is read and rewritten on every append. There is no
//! locking: concurrent writers from separate processes race and the last
//! rewrite wins.
use crate::error::StoreError;
use crate::submission::{Submission, COLUMNS};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Default backing file, relative to the working directory.
pub const DEFAULT_DATA_REL: &str = "data/submissions.csv";

/// Submission table persisted as CSV at an injected path.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every row in file order; a missing file is an empty table.
    pub fn load(&self) -> Result<Vec<Submission>, StoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.read_error(err.to_string())),
        };
        let rows = read_csv(file).map_err(|reason| self.read_error(reason))?;
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "loaded submissions");
        Ok(rows)
    }

    /// Add a row at the end and rewrite the backing file.
    pub fn append(&self, row: Submission) -> Result<(), StoreError> {
        let mut rows = self.load()?;
        rows.push(row);
        self.rewrite(&rows)?;
        tracing::info!(path = %self.path.display(), rows = rows.len(), "appended submission");
        Ok(())
    }

    /// Remove the backing file. Deleting an absent table is not an error.
    pub fn delete_all(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "deleted all submissions");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.write_error(err.to_string())),
        }
    }

    // Staged in a sibling temp file, then renamed over the table.
    fn rewrite(&self, rows: &[Submission]) -> Result<(), StoreError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|err| self.write_error(err.to_string()))?;
        let mut staged = tempfile::NamedTempFile::new_in(&parent)
            .map_err(|err| self.write_error(err.to_string()))?;
        write_csv(rows, &mut staged).map_err(|reason| self.write_error(reason))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|err| self.write_error(err.to_string()))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.write_error(err.error.to_string()))?;
        Ok(())
    }

    fn read_error(&self, reason: String) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            reason,
        }
    }

    fn write_error(&self, reason: String) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            reason,
        }
    }
}

/// Parse a submission table. Any malformed row fails the whole read.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Submission>, String> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|err| format!("read header: {err}"))?
        .clone();
    for column in COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(format!("missing column {column:?}"));
        }
    }
    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<Submission>().enumerate() {
        let row_number = idx + 1;
        let row = record.map_err(|err| format!("row {row_number}: {err}"))?;
        if let Some(field) = row.first_blank_field() {
            return Err(format!("row {row_number}: {field} is empty"));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Serialize rows in the backing-file format. The header is always written,
/// so an empty table still produces a valid file.
pub fn write_csv<W: Write>(rows: &[Submission], writer: W) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer
        .write_record(COLUMNS)
        .map_err(|err| format!("write header: {err}"))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| format!("write row: {err}"))?;
    }
    writer.flush().map_err(|err| format!("flush: {err}"))?;
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
