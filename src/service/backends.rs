//! Startup-time backend selection
//!
//! Each `Auto` choice tries the model-backed variant and falls back with a
//! warning; an explicit choice whose backend cannot be built is fatal.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{EngineConfig, RankerChoice, TranslatorChoice};
use crate::dataset::Dataset;
use crate::error::{EncodeError, EngineResult, TranslationError};
use crate::index::{CacheStore, EmbeddingIndex, TextEncoder};
use crate::ranker::{LexicalRanker, Ranker, SimilarityRanker};
use crate::translation::{IdentityTranslator, ModelTranslator, Translator};

/// Build the ranker named by `config.ranker`
pub fn build_ranker(config: &EngineConfig, dataset: &Dataset) -> EngineResult<Box<dyn Ranker>> {
    let ranker: Box<dyn Ranker> = match config.ranker {
        RankerChoice::Lexical => Box::new(LexicalRanker::new(dataset)),
        RankerChoice::Embedding => Box::new(build_similarity_ranker(config, dataset)?),
        RankerChoice::Auto => match build_similarity_ranker(config, dataset) {
            Ok(ranker) => Box::new(ranker),
            Err(e) => {
                warn!(error = %e, "embedding ranker unavailable, using lexical ranker");
                Box::new(LexicalRanker::new(dataset))
            }
        },
    };

    info!(ranker = ranker.name(), rows = ranker.len(), "ranker ready");
    Ok(ranker)
}

fn build_similarity_ranker(config: &EngineConfig, dataset: &Dataset) -> Result<SimilarityRanker, EncodeError> {
    let encoder = default_encoder()?;
    similarity_ranker(encoder, dataset, &CacheStore::new(config.bundle_path()))
}

/// Similarity ranker over `dataset`, reusing the bundle in `store` when valid
pub fn similarity_ranker(
    encoder: Arc<dyn TextEncoder>,
    dataset: &Dataset,
    store: &CacheStore,
) -> Result<SimilarityRanker, EncodeError> {
    let index = EmbeddingIndex::load_or_build(dataset, encoder.as_ref(), store)?;
    Ok(SimilarityRanker::new(encoder, index, LexicalRanker::new(dataset)))
}

#[cfg(feature = "embeddings")]
fn default_encoder() -> Result<Arc<dyn TextEncoder>, EncodeError> {
    Ok(Arc::new(crate::index::FastEmbedEncoder::try_new()?))
}

#[cfg(not(feature = "embeddings"))]
fn default_encoder() -> Result<Arc<dyn TextEncoder>, EncodeError> {
    Err(EncodeError::Unavailable(
        "built without the `embeddings` feature".to_string(),
    ))
}

/// Build the translator named by `config.translator`
pub fn build_translator(config: &EngineConfig) -> EngineResult<Box<dyn Translator>> {
    let translator: Box<dyn Translator> = match config.translator {
        TranslatorChoice::Identity => Box::new(IdentityTranslator),
        TranslatorChoice::Model => Box::new(load_model_translator(config)?),
        TranslatorChoice::Auto => match load_model_translator(config) {
            Ok(translator) => Box::new(translator),
            Err(e) => {
                warn!(error = %e, "translation models unavailable, using identity translator");
                Box::new(IdentityTranslator)
            }
        },
    };

    info!(translator = translator.name(), "translator ready");
    Ok(translator)
}

#[cfg(feature = "translation")]
fn load_model_translator(config: &EngineConfig) -> Result<ModelTranslator, TranslationError> {
    use crate::translation::MarianModel;

    let dir = config
        .translation_model_dir
        .as_ref()
        .ok_or_else(|| TranslationError::Unavailable("no translation model directory configured".to_string()))?;

    let te_en = MarianModel::load(&dir.join("te-en"))?;
    let en_te = MarianModel::load(&dir.join("en-te"))?;
    Ok(ModelTranslator::new(
        Arc::new(te_en),
        Arc::new(en_te),
        config.translation_cache_capacity,
    ))
}

#[cfg(not(feature = "translation"))]
fn load_model_translator(_config: &EngineConfig) -> Result<ModelTranslator, TranslationError> {
    Err(TranslationError::Unavailable(
        "built without the `translation` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetRow;

    fn dataset() -> Dataset {
        Dataset::from_rows(vec![DatasetRow::from_cells("fever headache", "Paracetamol")])
    }

    #[test]
    fn test_lexical_choice() {
        let config = EngineConfig::default().ranker(RankerChoice::Lexical);
        let ranker = build_ranker(&config, &dataset()).unwrap();
        assert_eq!(ranker.name(), "lexical");
    }

    #[test]
    fn test_identity_choice() {
        let config = EngineConfig::default().translator(TranslatorChoice::Identity);
        assert_eq!(build_translator(&config).unwrap().name(), "identity");
    }

    #[cfg(not(feature = "embeddings"))]
    #[test]
    fn test_auto_ranker_degrades_without_encoder() {
        let ranker = build_ranker(&EngineConfig::default(), &dataset()).unwrap();
        assert_eq!(ranker.name(), "lexical");
    }

    #[cfg(not(feature = "embeddings"))]
    #[test]
    fn test_explicit_embedding_without_encoder_is_fatal() {
        let config = EngineConfig::default().ranker(RankerChoice::Embedding);
        assert!(build_ranker(&config, &dataset()).is_err());
    }

    #[test]
    fn test_auto_translator_degrades_without_models() {
        // No model directory configured, with or without the feature
        let translator = build_translator(&EngineConfig::default()).unwrap();
        assert_eq!(translator.name(), "identity");
    }

    #[test]
    fn test_explicit_model_translator_without_models_is_fatal() {
        let config = EngineConfig::default().translator(TranslatorChoice::Model);
        assert!(build_translator(&config).is_err());
    }
}
