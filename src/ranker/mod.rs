//! Ranking of dataset rows against a query
//!
//! Both variants implement [`Ranker`]; the service picks one at startup and
//! never branches per request.

mod lexical;
mod similarity;

pub use lexical::LexicalRanker;
pub use similarity::SimilarityRanker;

use crate::types::RankedRow;

/// Scores every row against a query
pub trait Ranker: Send + Sync {
    /// At most `top_k` rows, best first; ties keep dataset order
    fn predict(&self, query: &str, top_k: usize) -> Vec<RankedRow>;

    /// Short name reported by `/stats`
    fn name(&self) -> &'static str;

    /// Number of rows the ranker can return
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable sort by descending score, then truncate
///
/// Non-finite scores count as 0 so the comparator stays a total order.
pub(crate) fn top_k(mut rows: Vec<RankedRow>, k: usize) -> Vec<RankedRow> {
    for row in &mut rows {
        if !row.score.is_finite() {
            row.score = 0.0;
        }
    }
    rows.sort_by(|a, b| b.score.total_cmp(&a.score));
    rows.truncate(k);
    rows
}
