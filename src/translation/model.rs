//! Model-backed translator with memoization and graceful degradation

use std::sync::Arc;

use tracing::{debug, warn};

use super::{TranslationCache, Translator};
use crate::error::TranslationError;

/// A loaded one-directional translation model
pub trait TranslationModel: Send + Sync {
    fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

/// One direction: model plus its memo
struct Direction {
    label: &'static str,
    model: Arc<dyn TranslationModel>,
    cache: TranslationCache,
}

impl Direction {
    fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        if let Some(hit) = self.cache.get(text) {
            debug!(direction = self.label, "translation cache hit");
            return hit;
        }

        match self.model.translate(text) {
            Ok(out) => {
                self.cache.insert(text, out.clone());
                out
            }
            Err(e) => {
                // Failures are not memoized so a transient error can recover
                warn!(direction = self.label, error = %e, "translation failed, returning input unchanged");
                text.to_string()
            }
        }
    }
}

/// Translator backed by one model per direction
pub struct ModelTranslator {
    te_en: Direction,
    en_te: Direction,
}

impl ModelTranslator {
    /// `cache_capacity` entries are memoized per direction
    pub fn new(
        te_en: Arc<dyn TranslationModel>,
        en_te: Arc<dyn TranslationModel>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            te_en: Direction {
                label: "te->en",
                model: te_en,
                cache: TranslationCache::new(cache_capacity),
            },
            en_te: Direction {
                label: "en->te",
                model: en_te,
                cache: TranslationCache::new(cache_capacity),
            },
        }
    }

    pub fn te_en_cache(&self) -> &TranslationCache {
        &self.te_en.cache
    }

    pub fn en_te_cache(&self) -> &TranslationCache {
        &self.en_te.cache
    }
}

impl Translator for ModelTranslator {
    fn te_to_en(&self, text: &str) -> String {
        self.te_en.translate(text)
    }

    fn en_to_te(&self, text: &str) -> String {
        self.en_te.translate(text)
    }

    fn name(&self) -> &'static str {
        "model"
    }
}
