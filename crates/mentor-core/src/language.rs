//! # Content Languages
//!
//! The two languages every test is authored in. Each logical file exists once
//! per language (metadata, question sides); `settings.json` is the only
//! language-independent file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A content language.
///
/// Every question and metadata record exists as a pair, one instance per
/// language. The derived `Ord` follows declaration order (`en` before `ru`)
/// so that reports and merged output are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Russian.
    Ru,
}

/// Number of supported languages.
pub const LANGUAGE_COUNT: usize = 2;

impl Language {
    /// All supported languages in canonical order.
    pub const ALL: [Language; LANGUAGE_COUNT] = [Language::En, Language::Ru];

    /// The lowercase two-letter code used in filenames and i18n objects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    /// The paired language: the one a counterpart file must exist in.
    pub fn other(&self) -> Language {
        match self {
            Language::En => Language::Ru,
            Language::Ru => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            other => Err(ParseError::UnknownLanguage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for lang in Language::ALL {
            assert_eq!(lang.as_str().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(ParseError::UnknownLanguage(_))
        ));
        assert!("EN".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn other_is_an_involution() {
        for lang in Language::ALL {
            assert_eq!(lang.other().other(), lang);
            assert_ne!(lang.other(), lang);
        }
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::Ru).unwrap(), "\"ru\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }
}
