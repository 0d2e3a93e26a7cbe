//! Deterministic backends for unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{EncodeError, TranslationError};
use crate::index::{tokenize, TextEncoder};
use crate::translation::TranslationModel;

/// Bag-of-words hashing encoder
pub(crate) struct HashingEncoder {
    pub(crate) calls: AtomicUsize,
    fail: bool,
}

impl HashingEncoder {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

impl TextEncoder for HashingEncoder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EncodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EncodeError::Failed("encoder offline".to_string()));
        }
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0.0f32; 32];
                for token in tokenize(text) {
                    let bucket = token
                        .bytes()
                        .fold(7usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize));
                    v[bucket % 32] += 1.0;
                }
                v
            })
            .collect())
    }

    fn model_id(&self) -> &str {
        "test-hashing"
    }
}

/// Dictionary-backed translation model that counts calls
///
/// Unknown inputs fail, which exercises the degrade path.
pub(crate) struct DictionaryModel {
    entries: HashMap<String, String>,
    pub(crate) calls: AtomicUsize,
}

impl DictionaryModel {
    pub(crate) fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl TranslationModel for DictionaryModel {
    fn translate(&self, text: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .get(text)
            .cloned()
            .ok_or_else(|| TranslationError::Failed(format!("no entry for '{}'", text)))
    }
}

