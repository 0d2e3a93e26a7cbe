//! On-disk embedding bundle
//!
//! The bundle co-locates the symptom texts, the per-row medicine lists and
//! the row vectors in one bincode file so they load together or not at all.
//! Writes go through [`atomic_write_with`] so a reader never observes a
//! partially written bundle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::error::CacheError;
use crate::utils::atomic_write_with;

/// Bumped whenever the bundle layout changes
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

/// Persisted embedding index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheBundle {
    pub format_version: u32,
    pub model_id: String,
    /// [`Dataset::fingerprint`] of the dataset the vectors were built from
    pub fingerprint: String,
    pub symptom_text: Vec<String>,
    pub medicines: Vec<Vec<String>>,
    pub vectors: Vec<Vec<f32>>,
}

/// Why a persisted bundle was not reused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("format version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },

    #[error("misaligned arrays: {symptoms} symptoms, {medicines} medicine lists, {vectors} vectors")]
    Misaligned {
        symptoms: usize,
        medicines: usize,
        vectors: usize,
    },

    #[error("bundle has {bundle} rows, dataset has {dataset}")]
    RowCount { bundle: usize, dataset: usize },

    #[error("built by model '{bundle}', active model is '{active}'")]
    Model { bundle: String, active: String },

    #[error("dataset content changed since the bundle was built")]
    Fingerprint,
}

impl CacheBundle {
    pub fn new(dataset: &Dataset, model_id: &str, vectors: Vec<Vec<f32>>) -> Self {
        Self {
            format_version: BUNDLE_FORMAT_VERSION,
            model_id: model_id.to_string(),
            fingerprint: dataset.fingerprint(),
            symptom_text: dataset.rows().iter().map(|r| r.symptom_text.clone()).collect(),
            medicines: dataset.rows().iter().map(|r| r.medicines.clone()).collect(),
            vectors,
        }
    }

    pub fn len(&self) -> usize {
        self.symptom_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptom_text.is_empty()
    }

    /// Check the bundle against the live dataset and the active encoder
    pub fn validate(&self, dataset: &Dataset, model_id: &str) -> Result<(), Rejection> {
        if self.format_version != BUNDLE_FORMAT_VERSION {
            return Err(Rejection::Version {
                found: self.format_version,
                expected: BUNDLE_FORMAT_VERSION,
            });
        }

        if self.symptom_text.len() != self.medicines.len()
            || self.symptom_text.len() != self.vectors.len()
        {
            return Err(Rejection::Misaligned {
                symptoms: self.symptom_text.len(),
                medicines: self.medicines.len(),
                vectors: self.vectors.len(),
            });
        }

        if self.len() != dataset.len() {
            return Err(Rejection::RowCount {
                bundle: self.len(),
                dataset: dataset.len(),
            });
        }

        if self.model_id != model_id {
            return Err(Rejection::Model {
                bundle: self.model_id.clone(),
                active: model_id.to_string(),
            });
        }

        if self.fingerprint != dataset.fingerprint() {
            return Err(Rejection::Fingerprint);
        }

        Ok(())
    }
}

/// Location of the persisted bundle
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the bundle; `Ok(None)` when no bundle has been written yet
    pub fn read(&self) -> Result<Option<CacheBundle>, CacheError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let bundle = bincode::deserialize(&bytes).map_err(|e| CacheError::Decode(e.to_string()))?;
        Ok(Some(bundle))
    }

    /// Atomically replace the bundle on disk
    pub fn write(&self, bundle: &CacheBundle) -> Result<(), CacheError> {
        let bytes = bincode::serialize(bundle).map_err(|e| CacheError::Encode(e.to_string()))?;
        atomic_write_with(&self.path, |writer| writer.write_all(&bytes))?;
        info!(path = %self.path.display(), rows = bundle.len(), "embedding bundle written");
        Ok(())
    }

    /// Bundle usable for `dataset` and `model_id`, if any
    ///
    /// Unreadable or stale bundles are logged and treated as absent.
    pub fn load_valid(&self, dataset: &Dataset, model_id: &str) -> Option<CacheBundle> {
        let bundle = match self.read() {
            Ok(Some(bundle)) => bundle,
            Ok(None) => {
                info!(path = %self.path.display(), "no embedding bundle on disk");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable embedding bundle, rebuilding");
                return None;
            }
        };

        match bundle.validate(dataset, model_id) {
            Ok(()) => Some(bundle),
            Err(reason) => {
                warn!(path = %self.path.display(), %reason, "stale embedding bundle, rebuilding");
                None
            }
        }
    }
}
