//! Token-set index for overlap ranking

use std::collections::HashSet;

use crate::dataset::Dataset;

/// Lower-cased token set per dataset row
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    rows: Vec<HashSet<String>>,
}

impl LexicalIndex {
    /// Tokenize every symptom text of the dataset
    pub fn build(dataset: &Dataset) -> Self {
        let rows = dataset
            .rows()
            .iter()
            .map(|row| tokenize(&row.symptom_text))
            .collect();
        Self { rows }
    }

    pub fn tokens(&self, row: usize) -> Option<&HashSet<String>> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[HashSet<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Lower-case and split on whitespace and semicolons
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
