//! Input language detection
//!
//! Combines a Telugu-script check with statistical language identification
//! (whatlang trigram models). Short or ambiguous strings can be
//! misclassified by the statistical pass; no other signal is consulted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language label of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Te,
    /// Telugu script alongside a non-Telugu statistical signal
    Mixed,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Te => "te",
            Language::Mixed => "mixed",
        }
    }

    /// Whether the query needs translating to English before ranking
    pub fn needs_translation(&self) -> bool {
        !matches!(self, Language::En)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `c` lies in the Telugu Unicode block (U+0C00..=U+0C7F)
pub fn is_telugu_char(c: char) -> bool {
    ('\u{0C00}'..='\u{0C7F}').contains(&c)
}

pub fn contains_telugu(text: &str) -> bool {
    text.chars().any(is_telugu_char)
}

/// Classify `text` as English, Telugu or mixed
pub fn detect(text: &str) -> Language {
    let text = text.trim();
    if text.is_empty() {
        return Language::En;
    }

    let has_telugu = contains_telugu(text);

    let detected = match whatlang::detect(text) {
        Some(info) => info.lang(),
        None => {
            return if has_telugu { Language::Te } else { Language::En };
        }
    };

    let is_telugu = detected == whatlang::Lang::Tel;
    if has_telugu && !is_telugu {
        return Language::Mixed;
    }
    if is_telugu {
        return Language::Te;
    }
    Language::En
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_english() {
        assert_eq!(detect(""), Language::En);
        assert_eq!(detect("   \n\t"), Language::En);
    }

    #[test]
    fn test_telugu_only() {
        assert_eq!(detect("జ్వరం మరియు తలనొప్పి"), Language::Te);
        assert_eq!(detect("నాకు దగ్గు ఉంది"), Language::Te);
    }

    #[test]
    fn test_english() {
        assert_eq!(
            detect("I have had a high fever and a terrible headache since yesterday"),
            Language::En
        );
    }

    #[test]
    fn test_mixed() {
        assert_eq!(
            detect("I have had a high fever and a terrible headache since yesterday తలనొప్పి"),
            Language::Mixed
        );
    }

    #[test]
    fn test_digits_only_fall_back_to_script() {
        assert_eq!(detect("12345"), Language::En);
    }

    #[test]
    fn test_telugu_block_bounds() {
        assert!(is_telugu_char('\u{0C00}'));
        assert!(is_telugu_char('\u{0C7F}'));
        assert!(!is_telugu_char('\u{0C80}'));
        assert!(!is_telugu_char('a'));
        assert!(contains_telugu("fever జ్వరం"));
    }

    #[test]
    fn test_needs_translation() {
        assert!(!Language::En.needs_translation());
        assert!(Language::Te.needs_translation());
        assert!(Language::Mixed.needs_translation());
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Mixed).unwrap(), "\"mixed\"");
        assert_eq!(Language::Te.to_string(), "te");
    }
}
