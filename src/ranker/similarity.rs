//! Embedding similarity ranker

use std::sync::Arc;

use tracing::warn;

use super::{top_k, LexicalRanker, Ranker};
use crate::index::{EmbeddingIndex, TextEncoder};
use crate::types::RankedRow;

/// Ranks rows by cosine similarity between the query vector and each row vector
///
/// Holds a lexical ranker over the same dataset; if the encoder fails on a
/// query, that request is served by the lexical ranking instead.
pub struct SimilarityRanker {
    encoder: Arc<dyn TextEncoder>,
    index: EmbeddingIndex,
    fallback: LexicalRanker,
}

impl SimilarityRanker {
    pub fn new(encoder: Arc<dyn TextEncoder>, index: EmbeddingIndex, fallback: LexicalRanker) -> Self {
        Self {
            encoder,
            index,
            fallback,
        }
    }
}

impl Ranker for SimilarityRanker {
    fn predict(&self, query: &str, k: usize) -> Vec<RankedRow> {
        if query.trim().is_empty() || k == 0 || self.index.is_empty() {
            return Vec::new();
        }

        let query_vector = match self.encoder.encode_one(query) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "query encoding failed, using lexical ranking");
                return self.fallback.predict(query, k);
            }
        };

        let scored = self
            .index
            .similarities(&query_vector)
            .into_iter()
            .enumerate()
            .map(|(row, score)| RankedRow::new(row, score))
            .collect();

        top_k(scored, k)
    }

    fn name(&self) -> &'static str {
        "embedding"
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}
