//! Recommendation service
//!
//! The one explicitly constructed context that owns the dataset, the ranker
//! and the translator. It is built once at startup, shared read-only by
//! every request handler, and dropped at shutdown to release the models.

mod backends;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

pub use backends::{build_ranker, build_translator, similarity_ranker};

use crate::aggregator::aggregate;
use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::error::EngineResult;
use crate::language;
use crate::ranker::Ranker;
use crate::translation::Translator;
use crate::types::RecommendationResult;

/// Snapshot of what the service is running with
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStats {
    pub rows: usize,
    pub ranker: &'static str,
    pub translator: &'static str,
    pub default_top_k: usize,
}

/// Orchestrates detection, translation, ranking and aggregation
pub struct RecommendationService {
    dataset: Dataset,
    ranker: Box<dyn Ranker>,
    translator: Box<dyn Translator>,
    config: EngineConfig,
}

impl RecommendationService {
    /// Load the dataset, build or load the index, load the models
    ///
    /// Any error here is fatal for the process.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let dataset = Dataset::load(&config.dataset_search_paths())?;
        let ranker = build_ranker(&config, &dataset)?;
        let translator = build_translator(&config)?;
        Ok(Self::from_parts(dataset, ranker, translator, config))
    }

    /// Assemble a service from already-built components
    pub fn from_parts(
        dataset: Dataset,
        ranker: Box<dyn Ranker>,
        translator: Box<dyn Translator>,
        config: EngineConfig,
    ) -> Self {
        info!(
            rows = dataset.len(),
            ranker = ranker.name(),
            translator = translator.name(),
            "recommendation service ready"
        );
        Self {
            dataset,
            ranker,
            translator,
            config,
        }
    }

    /// Recommend at most `top_k` distinct medicines for free-text symptoms
    pub fn recommend(&self, raw_text: &str, top_k: usize) -> RecommendationResult {
        let text = raw_text.trim();
        let input_language = language::detect(text);

        let normalized_query = if input_language.needs_translation() {
            self.translator.te_to_en(text)
        } else {
            text.to_string()
        };

        let ranked = self.ranker.predict(&normalized_query, top_k);
        let mut suggestions = aggregate(&ranked, self.dataset.rows(), top_k);

        if input_language.needs_translation() {
            for suggestion in &mut suggestions {
                suggestion.medicine = self.translator.en_to_te(&suggestion.medicine);
            }
            // Two English names may translate to the same text
            let mut seen = HashSet::new();
            suggestions.retain(|s| seen.insert(s.medicine.clone()));
        }

        debug!(
            language = %input_language,
            ranked = ranked.len(),
            suggestions = suggestions.len(),
            "recommendation computed"
        );

        RecommendationResult {
            input_language,
            normalized_query,
            suggestions,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            rows: self.dataset.len(),
            ranker: self.ranker.name(),
            translator: self.translator.name(),
            default_top_k: self.config.default_top_k,
        }
    }

    /// Release the index and models
    pub fn shutdown(self) {
        info!(ranker = self.ranker.name(), translator = self.translator.name(), "recommendation service stopped");
    }
}
