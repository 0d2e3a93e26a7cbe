//! CSV ingestion

use std::path::{Path, PathBuf};

use super::DatasetRow;
use crate::error::DatasetError;

pub const SYMPTOMS_COLUMN: &str = "symptoms";
pub const MEDICINES_COLUMN: &str = "medicines";
pub const MEDICINE_SEPARATOR: char = '|';

/// Return the first candidate that exists on disk
pub fn resolve_path(candidates: &[PathBuf]) -> Result<PathBuf, DatasetError> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| DatasetError::NotFound {
            checked: candidates.to_vec(),
        })
}

/// Parse the dataset CSV into rows
///
/// Both required columns must be present in the header; missing or blank
/// cells read as empty strings.
pub fn load_csv(path: &Path) -> Result<Vec<DatasetRow>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let (symptoms_idx, medicines_idx) = match (position(SYMPTOMS_COLUMN), position(MEDICINES_COLUMN)) {
        (Some(s), Some(m)) => (s, m),
        (s, m) => {
            let missing = [(SYMPTOMS_COLUMN, s), (MEDICINES_COLUMN, m)]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(DatasetError::Schema { missing });
        }
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let symptoms = record.get(symptoms_idx).unwrap_or("");
        let medicines = record.get(medicines_idx).unwrap_or("");
        rows.push(DatasetRow::from_cells(symptoms, medicines));
    }

    Ok(rows)
}
