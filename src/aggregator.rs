//! Cross-row medicine aggregation
//!
//! Walks ranked rows best-first and collects each row's medicines in source
//! order, skipping blanks and names already emitted. Collection stops as
//! soon as `top_k` suggestions exist, so a strong row with enough medicines
//! hides every lower-ranked row. Each suggestion carries its row's score.

use std::collections::HashSet;

use crate::dataset::DatasetRow;
use crate::types::{RankedRow, Suggestion};

/// Deduplicated, order-preserving suggestion list of at most `top_k` entries
///
/// Ranked rows pointing outside `rows` are ignored.
pub fn aggregate(ranked: &[RankedRow], rows: &[DatasetRow], top_k: usize) -> Vec<Suggestion> {
    let mut suggestions = Vec::with_capacity(top_k.min(ranked.len() * 2));
    if top_k == 0 {
        return suggestions;
    }

    let mut seen: HashSet<&str> = HashSet::new();

    for ranked_row in ranked {
        let Some(row) = rows.get(ranked_row.row) else {
            continue;
        };

        for medicine in &row.medicines {
            let name = medicine.trim();
            if name.is_empty() || !seen.insert(name) {
                continue;
            }

            suggestions.push(Suggestion::new(name, ranked_row.score));
            if suggestions.len() >= top_k {
                return suggestions;
            }
        }
    }

    suggestions
}
