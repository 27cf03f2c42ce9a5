//! # Question Types — Single Source of Truth
//!
//! The closed set of question variants. The variant is encoded in the
//! filename (`q{NN}.{type}.{lang}.json`), so this enum is the dispatch key
//! for both schema selection and the cross-language parity rules.
//!
//! Adding a variant means adding a schema file, a field-subset entry here,
//! and an export mapping; the exhaustive matches point at every site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A question variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Multiple choice: fixed options, one or several correct.
    Mcq,
    /// Free-form written answer, AI-graded against a reference.
    OpenText,
    /// Multi-turn conversation with the AI mentor.
    Chat,
}

/// Number of question variants.
pub const QUESTION_TYPE_COUNT: usize = 3;

impl QuestionType {
    /// All question variants in canonical order.
    pub const ALL: [QuestionType; QUESTION_TYPE_COUNT] =
        [QuestionType::Mcq, QuestionType::OpenText, QuestionType::Chat];

    /// The type name as it appears in filenames and exported documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::OpenText => "open_text",
            QuestionType::Chat => "chat",
        }
    }

    /// Filename of the JSON Schema this variant is validated against.
    pub fn schema_file(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "question.mcq.schema.json",
            QuestionType::OpenText => "question.open_text.schema.json",
            QuestionType::Chat => "question.chat.schema.json",
        }
    }

    /// The language-independent fields of this variant.
    ///
    /// These must be deeply equal between the `.en.` and `.ru.` sides of a
    /// question pair. Per-language fields (`text`, `correct_answer`,
    /// `explanation`, `ai_context`, suggestion texts) are deliberately
    /// absent. `ai_suggestions` scores and MCQ option counts are also
    /// language-independent but need element-wise comparison, so the parity
    /// rules handle them separately.
    pub fn lang_independent_fields(&self) -> &'static [&'static str] {
        match self {
            QuestionType::Mcq => &["difficulty", "correct_index", "correct_indices", "allow_multiple"],
            QuestionType::OpenText => &["difficulty", "min_words", "max_length"],
            QuestionType::Chat => &["difficulty", "max_turns", "min_words_per_turn"],
        }
    }

    /// Optional translatable fields of this variant.
    ///
    /// Each must be present in both languages or in neither; the pair is
    /// otherwise unmergeable without inventing text.
    pub fn optional_translatable_fields(&self) -> &'static [&'static str] {
        match self {
            QuestionType::Mcq | QuestionType::OpenText => &["explanation", "ai_context"],
            QuestionType::Chat => &["ai_context"],
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcq" => Ok(QuestionType::Mcq),
            "open_text" => Ok(QuestionType::OpenText),
            "chat" => Ok(QuestionType::Chat),
            other => Err(ParseError::UnknownQuestionType(other.to_string())),
        }
    }
}
