//! Medicine Recommender
//!
//! Suggests candidate medicines from free-text symptom descriptions in
//! English, Telugu, or a mix of both, for the pharmacy locator app.
//!
//! # Pipeline
//!
//! query → language detection → (Telugu/mixed: translate to English) →
//! ranker over a row index → cross-row aggregation → (translate names back)
//!
//! # Modules
//!
//! - `dataset`: CSV loading into an immutable row snapshot
//! - `index`: lexical and embedding indexes, on-disk embedding bundle
//! - `ranker`: overlap and cosine-similarity rankers
//! - `aggregator`: deduplicated, bounded suggestion list
//! - `language`: English / Telugu / mixed detection
//! - `translation`: identity and model-backed translators with LRU memo
//! - `service`: the recommendation context built once at startup
//! - `api`: Axum router for `/health`, `/predict_medicine`, `/stats`
//!
//! # Example
//!
//! ```no_run
//! use medicine_recommender::{EngineConfig, RecommendationService};
//!
//! let service = RecommendationService::from_config(EngineConfig::default())?;
//! let result = service.recommend("fever and headache", 5);
//! for s in &result.suggestions {
//!     println!("{} ({:.2})", s.medicine, s.score);
//! }
//! # Ok::<(), medicine_recommender::EngineError>(())
//! ```

pub mod aggregator;
pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod index;
pub mod language;
pub mod ranker;
pub mod service;
pub mod translation;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items at crate root
pub use config::{EngineConfig, RankerChoice, TranslatorChoice};
pub use dataset::{Dataset, DatasetRow};
pub use error::{DatasetError, EngineError, EngineResult};
pub use language::Language;
pub use service::RecommendationService;
pub use types::{RankedRow, RecommendationResult, Suggestion};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
