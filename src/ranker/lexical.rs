//! Token-overlap ranker

use std::sync::Arc;

use rayon::prelude::*;

use super::{top_k, Ranker};
use crate::dataset::Dataset;
use crate::index::{tokenize, LexicalIndex};
use crate::types::RankedRow;

/// Scores rows by `|shared tokens| / max(|query tokens|, |row tokens|)`
///
/// Rows sharing no token with the query are left out entirely.
#[derive(Debug, Clone)]
pub struct LexicalRanker {
    index: Arc<LexicalIndex>,
}

impl LexicalRanker {
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            index: Arc::new(LexicalIndex::build(dataset)),
        }
    }
}

impl Ranker for LexicalRanker {
    fn predict(&self, query: &str, k: usize) -> Vec<RankedRow> {
        if query.trim().is_empty() || k == 0 {
            return Vec::new();
        }

        let query_tokens = tokenize(query);
        let scored: Vec<RankedRow> = self
            .index
            .rows()
            .par_iter()
            .enumerate()
            .filter_map(|(row, tokens)| {
                let overlap = query_tokens.intersection(tokens).count();
                if overlap == 0 {
                    return None;
                }
                let denom = query_tokens.len().max(tokens.len());
                Some(RankedRow::new(row, overlap as f32 / denom as f32))
            })
            .collect();

        top_k(scored, k)
    }

    fn name(&self) -> &'static str {
        "lexical"
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}
