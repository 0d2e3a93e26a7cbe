//! Data types shared across the engine

mod recommendation;

pub use recommendation::{RankedRow, RecommendationResult, Suggestion};
