//! # Split-File Name Dispatch
//!
//! A test directory contains three roles of file, distinguished purely by
//! name:
//!
//! - `meta.{lang}.json` — per-language metadata
//! - `settings.json` — language-independent settings
//! - `q{NN}.{type}.{lang}.json` — one language side of a question pair
//!
//! Parsing is a pure mapping from the file name to a [`FileKind`]; the
//! variant's field schema never leaks in here, so new question types only
//! touch [`QuestionType`].

use std::str::FromStr;

use crate::language::Language;
use crate::question::QuestionType;

/// The role a file plays inside a test directory, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `meta.{lang}.json`
    Meta(Language),
    /// `settings.json`
    Settings,
    /// `q{NN}.{type}.{lang}.json`
    Question {
        /// One-based sequence number (`q00` parses, numbering rules reject it).
        seq: u32,
        /// Question variant from the filename.
        qtype: QuestionType,
        /// Language side.
        lang: Language,
    },
}

/// Parse a file name into its [`FileKind`].
///
/// Returns `None` for anything that is not a recognized test-directory file:
/// wrong extension, unknown role, unknown language or question type, or a
/// malformed sequence number. Sequence numbers are zero-padded to at least
/// two digits (`q01`, `q27`, `q100`).
pub fn parse_file_name(name: &str) -> Option<FileKind> {
    let stem = name.strip_suffix(".json")?;
    let parts: Vec<&str> = stem.split('.').collect();

    match parts.as_slice() {
        ["settings"] => Some(FileKind::Settings),
        ["meta", lang] => Language::from_str(lang).ok().map(FileKind::Meta),
        [seq_part, qtype, lang] => {
            let digits = seq_part.strip_prefix('q')?;
            if digits.len() < 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let seq: u32 = digits.parse().ok()?;
            let qtype = QuestionType::from_str(qtype).ok()?;
            let lang = Language::from_str(lang).ok()?;
            Some(FileKind::Question { seq, qtype, lang })
        }
        _ => None,
    }
}

/// Render the canonical file name for a question side: `q02.mcq.en.json`.
pub fn question_file_name(seq: u32, qtype: QuestionType, lang: Language) -> String {
    format!("q{seq:02}.{qtype}.{lang}.json")
}

/// Render the language-less label used in findings: `q02.mcq`.
pub fn question_label(seq: u32, qtype: QuestionType) -> String {
    format!("q{seq:02}.{qtype}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_meta_files() {
        assert_eq!(
            parse_file_name("meta.en.json"),
            Some(FileKind::Meta(Language::En))
        );
        assert_eq!(
            parse_file_name("meta.ru.json"),
            Some(FileKind::Meta(Language::Ru))
        );
        assert_eq!(parse_file_name("meta.fr.json"), None);
        assert_eq!(parse_file_name("meta.json"), None);
    }

    #[test]
    fn parses_settings() {
        assert_eq!(parse_file_name("settings.json"), Some(FileKind::Settings));
        assert_eq!(parse_file_name("settings.en.json"), None);
    }

    #[test]
    fn parses_question_files() {
        assert_eq!(
            parse_file_name("q01.mcq.en.json"),
            Some(FileKind::Question {
                seq: 1,
                qtype: QuestionType::Mcq,
                lang: Language::En,
            })
        );
        assert_eq!(
            parse_file_name("q12.open_text.ru.json"),
            Some(FileKind::Question {
                seq: 12,
                qtype: QuestionType::OpenText,
                lang: Language::Ru,
            })
        );
        assert_eq!(
            parse_file_name("q100.chat.en.json"),
            Some(FileKind::Question {
                seq: 100,
                qtype: QuestionType::Chat,
                lang: Language::En,
            })
        );
    }

    #[test]
    fn q00_parses_so_numbering_rules_can_name_it() {
        assert_eq!(
            parse_file_name("q00.mcq.en.json"),
            Some(FileKind::Question {
                seq: 0,
                qtype: QuestionType::Mcq,
                lang: Language::En,
            })
        );
    }

    #[test]
    fn rejects_malformed_names() {
        assert_eq!(parse_file_name("q1.mcq.en.json"), None); // one digit
        assert_eq!(parse_file_name("q01.essay.en.json"), None); // unknown type
        assert_eq!(parse_file_name("q01.mcq.de.json"), None); // unknown lang
        assert_eq!(parse_file_name("q01.mcq.en.yaml"), None); // wrong extension
        assert_eq!(parse_file_name("x01.mcq.en.json"), None); // wrong prefix
        assert_eq!(parse_file_name("qab.mcq.en.json"), None); // non-digits
        assert_eq!(parse_file_name("README.md"), None);
        assert_eq!(parse_file_name("notes.json"), None);
    }

    #[test]
    fn labels_are_zero_padded() {
        assert_eq!(question_label(2, QuestionType::Mcq), "q02.mcq");
        assert_eq!(question_label(42, QuestionType::Chat), "q42.chat");
        assert_eq!(
            question_file_name(7, QuestionType::OpenText, Language::Ru),
            "q07.open_text.ru.json"
        );
    }

    proptest! {
        #[test]
        fn file_name_round_trips(
            seq in 0u32..10_000,
            qtype_idx in 0usize..QuestionType::ALL.len(),
            lang_idx in 0usize..Language::ALL.len(),
        ) {
            let qtype = QuestionType::ALL[qtype_idx];
            let lang = Language::ALL[lang_idx];
            let name = question_file_name(seq, qtype, lang);
            prop_assert_eq!(
                parse_file_name(&name),
                Some(FileKind::Question { seq, qtype, lang })
            );
        }
    }
}
