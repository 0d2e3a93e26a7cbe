//! Embedding index and the text encoder capability

use rayon::prelude::*;
use tracing::{info, warn};

use super::cache::{CacheBundle, CacheStore};
use crate::dataset::Dataset;
use crate::error::EncodeError;

/// Maps text into a fixed-length vector space
pub trait TextEncoder: Send + Sync {
    /// Encode a batch, one vector per input in the same order
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EncodeError>;

    /// Stable identifier of the model; bundles built by another model are rejected
    fn model_id(&self) -> &str;

    fn encode_one(&self, text: &str) -> Result<Vec<f32>, EncodeError> {
        let mut vectors = self.encode(&[text.to_string()])?;
        if vectors.len() != 1 {
            return Err(EncodeError::CountMismatch {
                expected: 1,
                got: vectors.len(),
            });
        }
        vectors
            .pop()
            .ok_or(EncodeError::CountMismatch { expected: 1, got: 0 })
    }
}

/// One vector per dataset row
#[derive(Debug, Clone, Default)]
pub struct EmbeddingIndex {
    vectors: Vec<Vec<f32>>,
}

impl EmbeddingIndex {
    /// Encode every symptom text of the dataset
    pub fn build(dataset: &Dataset, encoder: &dyn TextEncoder) -> Result<Self, EncodeError> {
        if dataset.is_empty() {
            return Ok(Self::default());
        }

        let vectors = encoder.encode(&dataset.symptom_texts())?;
        if vectors.len() != dataset.len() {
            return Err(EncodeError::CountMismatch {
                expected: dataset.len(),
                got: vectors.len(),
            });
        }
        Ok(Self { vectors })
    }

    /// Reuse the persisted bundle when it still matches the dataset, else rebuild and persist
    pub fn load_or_build(
        dataset: &Dataset,
        encoder: &dyn TextEncoder,
        store: &CacheStore,
    ) -> Result<Self, EncodeError> {
        if let Some(bundle) = store.load_valid(dataset, encoder.model_id()) {
            info!(path = %store.path().display(), rows = bundle.len(), "embedding index loaded from cache");
            return Ok(Self::from_bundle(bundle));
        }

        info!(rows = dataset.len(), model = encoder.model_id(), "building embedding index");
        let index = Self::build(dataset, encoder)?;

        let bundle = index.to_bundle(dataset, encoder.model_id());
        // The in-memory index is still usable when the cache dir is read-only
        if let Err(e) = store.write(&bundle) {
            warn!(path = %store.path().display(), error = %e, "failed to persist embedding index");
        }

        Ok(index)
    }

    pub fn from_bundle(bundle: CacheBundle) -> Self {
        Self {
            vectors: bundle.vectors,
        }
    }

    pub fn to_bundle(&self, dataset: &Dataset, model_id: &str) -> CacheBundle {
        CacheBundle::new(dataset, model_id, self.vectors.clone())
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Cosine similarity of `query` against every row, in row order
    pub fn similarities(&self, query: &[f32]) -> Vec<f32> {
        self.vectors
            .par_iter()
            .map(|row| cosine_similarity(query, row))
            .collect()
    }
}

/// Cosine of the angle between two vectors; 0 for mismatched, zero or non-finite vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let cosine = dot / (norm_a.sqrt() * norm_b.sqrt());
    if cosine.is_finite() {
        cosine
    } else {
        0.0
    }
}

/// all-MiniLM-L6-v2 sentence encoder via fastembed (ONNX runtime)
#[cfg(feature = "embeddings")]
pub struct FastEmbedEncoder {
    model: parking_lot::Mutex<fastembed::TextEmbedding>,
    model_id: String,
}

#[cfg(feature = "embeddings")]
impl FastEmbedEncoder {
    pub const MODEL_ID: &'static str = "sentence-transformers/all-MiniLM-L6-v2";

    /// Load the model, downloading it into the fastembed cache on first use
    pub fn try_new() -> Result<Self, EncodeError> {
        let model = fastembed::TextEmbedding::try_new(fastembed::InitOptions::new(
            fastembed::EmbeddingModel::AllMiniLML6V2,
        ))
        .map_err(|e| EncodeError::Unavailable(e.to_string()))?;

        Ok(Self {
            model: parking_lot::Mutex::new(model),
            model_id: Self::MODEL_ID.to_string(),
        })
    }
}

#[cfg(feature = "embeddings")]
impl TextEncoder for FastEmbedEncoder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EncodeError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.model
            .lock()
            .embed(texts.to_vec(), None)
            .map_err(|e| EncodeError::Failed(e.to_string()))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetRow;
    use crate::testing::HashingEncoder;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    fn dataset() -> Dataset {
        Dataset::from_rows(vec![
            DatasetRow::from_cells("fever headache", "Paracetamol|Crocin"),
            DatasetRow::from_cells("dry cough", "Benadryl"),
        ])
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[f32::NAN, 1.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[f32::INFINITY, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_build_aligns_with_dataset() {
        let index = EmbeddingIndex::build(&dataset(), &HashingEncoder::new()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.vectors()[0].len(), 32);
    }

    #[test]
    fn test_load_or_build_persists_then_reuses() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path().join("bundle.bin"));
        let encoder = HashingEncoder::new();
        let dataset = dataset();

        let built = EmbeddingIndex::load_or_build(&dataset, &encoder, &store).unwrap();
        assert!(store.exists());
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 1);

        let reloaded = EmbeddingIndex::load_or_build(&dataset, &encoder, &store).unwrap();
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(reloaded.vectors(), built.vectors());
    }

    #[test]
    fn test_load_or_build_rebuilds_on_row_count_change() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path().join("bundle.bin"));
        let encoder = HashingEncoder::new();

        EmbeddingIndex::load_or_build(&dataset(), &encoder, &store).unwrap();

        let grown = Dataset::from_rows(vec![
            DatasetRow::from_cells("fever headache", "Paracetamol|Crocin"),
            DatasetRow::from_cells("dry cough", "Benadryl"),
            DatasetRow::from_cells("acidity", "Digene"),
        ]);
        let index = EmbeddingIndex::load_or_build(&grown, &encoder, &store).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.read().unwrap().unwrap().len(), 3);
    }

    #[test]
    fn test_build_propagates_encoder_failure() {
        assert!(EmbeddingIndex::build(&dataset(), &HashingEncoder::failing()).is_err());
    }
}
