//! Student roster CSV import.
//!
//! Registrars export the incoming cohort as a spreadsheet; this module turns
//! that export into [`StudentProfile`] rows ready for the Directory Store.

mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::workflows::allocation::domain::StudentProfile;

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<StudentProfile>, RosterImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<StudentProfile>, RosterImportError> {
        parser::parse_records(reader)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster line {line}: bad {field} value '{value}'")]
    Invalid {
        line: usize,
        field: &'static str,
        value: String,
    },
}
