//! # Authored Data Model
//!
//! Typed views of the split files as authors write them. The exporter
//! deserializes into these after validation; the validator deliberately
//! works on raw `serde_json::Value` instead, because "absent" and
//! "explicitly default-valued" must stay distinguishable when reporting to
//! authors.
//!
//! All structs reject unknown fields, mirroring `additionalProperties:
//! false` in the schemas.

use serde::{Deserialize, Serialize};

/// Per-language test metadata (`meta.en.json` / `meta.ru.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    /// Test title shown to students.
    pub name: String,
    /// Short summary of what the test covers.
    pub description: String,
    /// Instructions shown to the student before starting.
    pub instructions: String,
    /// Grading/assistance instructions for the AI mentor.
    pub ai_instructions: String,
    /// Instructions for the optional final overview step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_overview_instructions: Option<String>,
}

/// One authored AI suggestion.
///
/// `score` is language-independent and must match the other language side
/// position-wise; `text` is per-language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiSuggestion {
    /// Suggestion strength in `[0, 1]`.
    pub score: f64,
    /// Suggestion text in this file's language.
    pub text: String,
}

/// One language side of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct McqQuestion {
    pub text: String,
    pub difficulty: u8,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<AiSuggestion>>,
    /// Answer options; count must match the other language side.
    pub options: Vec<String>,
    pub allow_multiple: bool,
    /// Populated iff `allow_multiple` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<u32>,
    /// Populated iff `allow_multiple` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_indices: Option<Vec<u32>>,
}

/// One language side of an open-text question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenTextQuestion {
    pub text: String,
    pub difficulty: u8,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<AiSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// One language side of a chat question. Chat has no post-answer
/// explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatQuestion {
    pub text: String,
    pub difficulty: u8,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<AiSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words_per_turn: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metadata_deserializes_and_rejects_extras() {
        let meta: Metadata = serde_json::from_value(json!({
            "name": "Rust basics",
            "description": "Ownership and borrowing",
            "instructions": "Answer in your own words.",
            "ai_instructions": "Grade strictly."
        }))
        .unwrap();
        assert!(meta.final_overview_instructions.is_none());

        let extra = serde_json::from_value::<Metadata>(json!({
            "name": "x",
            "description": "x",
            "instructions": "x",
            "ai_instructions": "x",
            "surprise": true
        }));
        assert!(extra.is_err());
    }

    #[test]
    fn mcq_missing_required_field_names_it() {
        let err = serde_json::from_value::<McqQuestion>(json!({
            "text": "Pick one",
            "difficulty": 2,
            "correct_answer": "A",
            "allow_multiple": false
        }))
        .unwrap_err();
        assert!(err.to_string().contains("options"), "{err}");
    }

    #[test]
    fn chat_rejects_explanation() {
        let err = serde_json::from_value::<ChatQuestion>(json!({
            "text": "Discuss",
            "difficulty": 3,
            "correct_answer": "Covers tradeoffs",
            "explanation": "not a chat field"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("explanation"), "{err}");
    }

    #[test]
    fn optional_fields_skip_when_absent() {
        let q = OpenTextQuestion {
            text: "Why?".into(),
            difficulty: 1,
            correct_answer: "Because.".into(),
            explanation: None,
            image_url: None,
            ai_context: None,
            ai_suggestions: None,
            min_words: Some(20),
            max_length: None,
        };
        let value = serde_json::to_value(&q).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("min_words"));
        assert!(!obj.contains_key("max_length"));
        assert!(!obj.contains_key("explanation"));
    }
}
