//! # Platform Wire Format
//!
//! The merged document shape (`format_version` 1). Serialize-only: the
//! platform consumes this, the toolchain never reads it back.

use serde::Serialize;

use mentor_core::QuestionType;

use crate::settings::ResolvedSettings;

/// Wire format marker so downstream consumers can detect schema evolution.
pub const FORMAT_VERSION: u32 = 1;

/// One translatable field after merging both language files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct I18nText {
    pub en: String,
    pub ru: String,
}

impl I18nText {
    pub fn new(en: impl Into<String>, ru: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ru: ru.into(),
        }
    }
}

/// The full merged test document.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedTest {
    pub format_version: u32,
    pub name: I18nText,
    pub description: I18nText,
    pub instructions: I18nText,
    pub ai_instructions: I18nText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_overview_instructions: Option<I18nText>,
    /// Settings fields sit at the top level of the document, with the
    /// research record nested inside them.
    #[serde(flatten)]
    pub settings: ResolvedSettings,
    /// Questions in ascending sequence order.
    pub questions: Vec<ExportedQuestion>,
}

/// One merged question pair.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedQuestion {
    pub sequence_number: u32,
    pub question_type: QuestionType,
    pub question_data: QuestionData,
}

/// Type-specific question payload; the tag lives in `question_type`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QuestionData {
    Mcq(McqData),
    OpenText(OpenTextData),
    Chat(ChatData),
}

/// One merged AI suggestion: shared score, per-language text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedSuggestion {
    pub score: f64,
    pub text: I18nText,
}

/// Merged multiple-choice payload.
#[derive(Debug, Clone, Serialize)]
pub struct McqData {
    pub text: I18nText,
    pub difficulty: u8,
    pub correct_answer: I18nText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<I18nText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<I18nText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<MergedSuggestion>>,
    /// Options merged index-wise into language pairs.
    pub options: Vec<I18nText>,
    pub allow_multiple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_indices: Option<Vec<u32>>,
}

/// Merged open-text payload.
#[derive(Debug, Clone, Serialize)]
pub struct OpenTextData {
    pub text: I18nText,
    pub difficulty: u8,
    pub correct_answer: I18nText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<I18nText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<I18nText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<MergedSuggestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_words: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// Merged chat payload. Chat has no explanation field.
#[derive(Debug, Clone, Serialize)]
pub struct ChatData {
    pub text: I18nText,
    pub difficulty: u8,
    pub correct_answer: I18nText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<I18nText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<MergedSuggestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_words_per_turn: Option<u32>,
}
