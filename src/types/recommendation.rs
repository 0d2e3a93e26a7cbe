//! Ranking and recommendation result types

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// One ranked dataset row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRow {
    /// Ordinal position in the dataset (and the index)
    pub row: usize,
    pub score: f32,
}

impl RankedRow {
    pub fn new(row: usize, score: f32) -> Self {
        Self { row, score }
    }
}

/// A suggested medicine carrying the score of the row it came from
///
/// Scores are only comparable between suggestions produced by the same ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub medicine: String,
    pub score: f32,
}

impl Suggestion {
    pub fn new(medicine: impl Into<String>, score: f32) -> Self {
        Self {
            medicine: medicine.into(),
            score,
        }
    }
}

/// Outcome of one `recommend` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub input_language: Language,
    /// Query text as handed to the ranker (English after translation)
    pub normalized_query: String,
    pub suggestions: Vec<Suggestion>,
}

impl RecommendationResult {
    /// Result for blank input
    pub fn empty() -> Self {
        Self {
            input_language: Language::En,
            normalized_query: String::new(),
            suggestions: Vec::new(),
        }
    }
}
