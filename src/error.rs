//! Error types for the recommendation engine
//!
//! Startup failures (dataset, schema, explicitly requested backends) are
//! fatal and bubble up as [`EngineError`]. Runtime failures of the encoder
//! or translator are degraded inside the engine and never reach callers.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for engine construction
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while loading the dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found, checked: {checked:?}")]
    NotFound { checked: Vec<PathBuf> },

    #[error("dataset is missing required column(s): {missing:?}")]
    Schema { missing: Vec<String> },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the on-disk index bundle
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bundle encoding failed: {0}")]
    Encode(String),

    #[error("bundle decoding failed: {0}")]
    Decode(String),
}

/// Errors raised by a text encoder
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("encoder backend unavailable: {0}")]
    Unavailable(String),

    #[error("encoding failed: {0}")]
    Failed(String),

    #[error("encoder returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },
}

/// Errors raised by a translation model
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation model unavailable: {0}")]
    Unavailable(String),

    #[error("translation failed: {0}")]
    Failed(String),
}

/// Fatal startup errors for the recommendation service
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("embedding backend: {0}")]
    Encoder(#[from] EncodeError),

    #[error("translation backend: {0}")]
    Translation(#[from] TranslationError),
}
