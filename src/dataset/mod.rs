//! Symptom/medicine dataset
//!
//! The dataset is a CSV file with a `symptoms` column (free text) and a
//! `medicines` column (names joined by `|`). It is loaded once at startup
//! into an immutable [`Dataset`]; every index is aligned to its row order.

mod loader;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use loader::{load_csv, resolve_path, MEDICINES_COLUMN, MEDICINE_SEPARATOR, SYMPTOMS_COLUMN};

use crate::error::DatasetError;

/// One symptom entry and its medicines, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub symptom_text: String,
    /// First entry is the primary medicine for the row
    pub medicines: Vec<String>,
}

impl DatasetRow {
    pub fn new(symptom_text: impl Into<String>, medicines: Vec<String>) -> Self {
        Self {
            symptom_text: symptom_text.into(),
            medicines,
        }
    }

    /// Build a row from the raw pipe-joined medicines cell
    pub fn from_cells(symptoms: &str, medicines: &str) -> Self {
        Self {
            symptom_text: symptoms.to_string(),
            medicines: medicines.split(MEDICINE_SEPARATOR).map(str::to_string).collect(),
        }
    }
}

/// Immutable in-memory snapshot of the dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Dataset from already-parsed rows
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        Self { rows, source: None }
    }

    /// Load the first existing file among `candidates`
    pub fn load(candidates: &[PathBuf]) -> Result<Self, DatasetError> {
        let path = resolve_path(candidates)?;
        Self::load_file(&path)
    }

    /// Load a specific CSV file
    pub fn load_file(path: &Path) -> Result<Self, DatasetError> {
        let rows = load_csv(path)?;
        tracing::info!(path = %path.display(), rows = rows.len(), "dataset loaded");
        Ok(Self {
            rows,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&DatasetRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// File the dataset was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn symptom_texts(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.symptom_text.clone()).collect()
    }

    /// SHA-256 over every row's symptom text and medicine list
    ///
    /// Used to detect content edits that keep the row count unchanged.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for row in &self.rows {
            hasher.update(row.symptom_text.as_bytes());
            hasher.update([0x1f]);
            for medicine in &row.medicines {
                hasher.update(medicine.as_bytes());
                hasher.update([0x1e]);
            }
            hasher.update([0x1d]);
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells_keeps_order_and_raw_names() {
        let row = DatasetRow::from_cells("fever headache", "Paracetamol| Crocin |");
        assert_eq!(row.medicines, vec!["Paracetamol", " Crocin ", ""]);
    }

    #[test]
    fn test_empty_medicines_cell() {
        let row = DatasetRow::from_cells("cough", "");
        assert_eq!(row.medicines, vec![""]);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = Dataset::from_rows(vec![DatasetRow::from_cells("fever", "Paracetamol")]);
        let b = Dataset::from_rows(vec![DatasetRow::from_cells("fever", "Crocin")]);
        let c = Dataset::from_rows(vec![DatasetRow::from_cells("fever", "Paracetamol")]);
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_fingerprint_separates_fields() {
        let a = Dataset::from_rows(vec![DatasetRow::new("ab", vec!["c".to_string()])]);
        let b = Dataset::from_rows(vec![DatasetRow::new("a", vec!["bc".to_string()])]);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
