//! Row indexes aligned 1:1 with the dataset
//!
//! Two variants exist:
//! - [`LexicalIndex`]: one lower-cased token set per row, built in memory
//! - [`EmbeddingIndex`]: one vector per row from a [`TextEncoder`], persisted
//!   through the [`CacheStore`] so restarts skip re-encoding
//!
//! Row *i* of any index always refers to row *i* of the dataset.

mod cache;
mod embedding;
mod lexical;

pub use cache::{CacheBundle, CacheStore, Rejection, BUNDLE_FORMAT_VERSION};
pub use embedding::{cosine_similarity, EmbeddingIndex, TextEncoder};
pub use lexical::{tokenize, LexicalIndex};

#[cfg(feature = "embeddings")]
pub use embedding::FastEmbedEncoder;
