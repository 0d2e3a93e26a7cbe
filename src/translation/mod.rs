//! English <-> Telugu translation bridge
//!
//! [`Translator`] is the capability the service depends on. Two variants:
//! - [`IdentityTranslator`]: returns input unchanged
//! - [`ModelTranslator`]: one [`TranslationModel`] per direction, each
//!   memoized in a bounded [`TranslationCache`]; model failures degrade to
//!   returning the input text
//!
//! The variant is chosen once when the service is built.

mod cache;
#[cfg(feature = "translation")]
mod marian;
mod model;

pub use cache::TranslationCache;
#[cfg(feature = "translation")]
pub use marian::MarianModel;
pub use model::{ModelTranslator, TranslationModel};

/// Bidirectional text conversion; never fails
pub trait Translator: Send + Sync {
    fn te_to_en(&self, text: &str) -> String;

    fn en_to_te(&self, text: &str) -> String;

    /// Short name reported by `/stats`
    fn name(&self) -> &'static str;
}

/// Pass-through translator used when no models are available
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn te_to_en(&self, text: &str) -> String {
        text.to_string()
    }

    fn en_to_te(&self, text: &str) -> String {
        text.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
