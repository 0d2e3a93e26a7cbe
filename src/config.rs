//! Engine configuration
//!
//! Paths, limits and backend choices for [`RecommendationService`](crate::service::RecommendationService).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name of the persisted embedding bundle inside the cache directory
pub const BUNDLE_FILE_NAME: &str = "medicine_predictor.bin";

/// Default dataset file name
pub const DATASET_FILE_NAME: &str = "symptoms_medicines_en.csv";

/// Which ranker variant to build at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankerChoice {
    /// Embedding ranker when the encoder can be built, otherwise lexical
    #[default]
    Auto,
    Lexical,
    Embedding,
}

/// Which translator variant to build at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslatorChoice {
    /// Model-backed when the models can be loaded, otherwise identity
    #[default]
    Auto,
    Identity,
    Model,
}

impl FromStr for RankerChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "lexical" => Ok(Self::Lexical),
            "embedding" => Ok(Self::Embedding),
            other => Err(format!("unknown ranker '{}' (auto|lexical|embedding)", other)),
        }
    }
}

impl FromStr for TranslatorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "identity" => Ok(Self::Identity),
            "model" => Ok(Self::Model),
            other => Err(format!("unknown translator '{}' (auto|identity|model)", other)),
        }
    }
}

impl fmt::Display for RankerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Lexical => write!(f, "lexical"),
            Self::Embedding => write!(f, "embedding"),
        }
    }
}

impl fmt::Display for TranslatorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Identity => write!(f, "identity"),
            Self::Model => write!(f, "model"),
        }
    }
}

/// Configuration for the recommendation engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Explicit dataset path, tried before the candidates
    pub dataset_path: Option<PathBuf>,
    /// Fallback dataset locations, tried in order
    pub dataset_candidates: Vec<PathBuf>,
    /// Directory holding the persisted embedding bundle
    pub cache_dir: PathBuf,
    pub ranker: RankerChoice,
    pub translator: TranslatorChoice,
    /// Directory with `te-en/` and `en-te/` model subdirectories
    pub translation_model_dir: Option<PathBuf>,
    /// Memo entries per translation direction
    pub translation_cache_capacity: usize,
    /// Suggestions returned when a request does not ask for a count
    pub default_top_k: usize,
    /// Upper bound on requested suggestions
    pub max_top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            dataset_candidates: vec![
                PathBuf::from("data").join(DATASET_FILE_NAME),
                PathBuf::from("..").join("Ai").join(DATASET_FILE_NAME),
            ],
            cache_dir: PathBuf::from("models"),
            ranker: RankerChoice::Auto,
            translator: TranslatorChoice::Auto,
            translation_model_dir: None,
            translation_cache_capacity: 256,
            default_top_k: 5,
            max_top_k: 50,
        }
    }
}

impl EngineConfig {
    /// Config that reads the dataset from `path` and keeps the cache next to it
    pub fn with_dataset<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let cache_dir = path
            .parent()
            .map(|p| p.join("models"))
            .unwrap_or_else(|| PathBuf::from("models"));
        Self {
            dataset_path: Some(path),
            cache_dir,
            ..Default::default()
        }
    }

    pub fn cache_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cache_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn ranker(mut self, choice: RankerChoice) -> Self {
        self.ranker = choice;
        self
    }

    pub fn translator(mut self, choice: TranslatorChoice) -> Self {
        self.translator = choice;
        self
    }

    /// Every path the dataset loader will try, in order
    ///
    /// An explicit `dataset_path` is the only path tried; the built-in
    /// candidates are searched only when none was given.
    pub fn dataset_search_paths(&self) -> Vec<PathBuf> {
        match &self.dataset_path {
            Some(path) => vec![path.clone()],
            None => self.dataset_candidates.clone(),
        }
    }

    /// Path of the persisted embedding bundle
    pub fn bundle_path(&self) -> PathBuf {
        self.cache_dir.join(BUNDLE_FILE_NAME)
    }

    /// Clamp a requested suggestion count, falling back to the default
    pub fn resolve_top_k(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_top_k).min(self.max_top_k)
    }
}
