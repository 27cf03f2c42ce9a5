//! # Schema Registry
//!
//! Loads every `*.schema.json` file from the schemas directory at
//! construction time and validates parsed documents against them on demand.
//!
//! ## Design
//!
//! Validation returns *all* violations for a document with their JSON
//! Pointer paths; an empty list means the document conforms. Failures to
//! load or compile a schema are [`SchemaError`]s: those indicate a broken
//! repository checkout, not broken content, and callers treat them as
//! operational errors rather than findings.
//!
//! The mentor schemas are draft-07 and self-contained (internal
//! `#/definitions/...` references only), so no external `$ref` resolution
//! is wired up.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use mentor_core::FileKind;

/// Errors raised by registry operations.
///
/// These are distinct from document violations: a [`SchemaError`] means the
/// toolchain cannot do its job, not that the content is wrong.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema file could not be read or parsed.
    #[error("failed to load schema {path}: {reason}")]
    SchemaLoad {
        /// Path of the schema file that failed to load.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The requested schema is not in the registry.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// A schema could not be compiled into a validator.
    #[error("failed to compile schema {schema}: {reason}")]
    SchemaCompile {
        /// Filename of the schema that failed to compile.
        schema: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// A single schema violation with its location in the document.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer to the violating field; empty at the document root.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Map a parsed filename to the schema that governs it.
pub fn schema_name_for(kind: &FileKind) -> &'static str {
    match kind {
        FileKind::Meta(_) => "meta.schema.json",
        FileKind::Settings => "settings.schema.json",
        FileKind::Question { qtype, .. } => qtype.schema_file(),
    }
}

/// The loaded schema corpus.
///
/// Construction scans the schemas directory once; validators are compiled
/// per check. The registry is `Send + Sync` and can be shared freely.
#[derive(Debug)]
pub struct SchemaRegistry {
    /// Directory the schemas were loaded from.
    schema_dir: PathBuf,
    /// Parsed schemas indexed by filename (e.g. `meta.schema.json`).
    schemas: HashMap<String, Value>,
}

impl SchemaRegistry {
    /// Load every `*.schema.json` file from `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] if the directory cannot be read
    /// or any schema file is not valid JSON. A missing directory is an
    /// error: the tools cannot validate anything without their contracts.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Result<Self, SchemaError> {
        let schema_dir = schema_dir.into();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| SchemaError::SchemaLoad {
            path: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| SchemaError::SchemaLoad {
                path: schema_dir.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".schema.json") {
                continue;
            }

            let content =
                std::fs::read_to_string(&path).map_err(|e| SchemaError::SchemaLoad {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            let schema: Value =
                serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
                    path: path.display().to_string(),
                    reason: format!("invalid JSON: {e}"),
                })?;
            schemas.insert(name.to_string(), schema);
        }

        Ok(Self { schema_dir, schemas })
    }

    /// The directory the schemas were loaded from.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Filenames of all loaded schemas, sorted.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Check a parsed document against a named schema.
    ///
    /// Returns every violation found; an empty vector means the document
    /// conforms.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaNotFound`] if `schema_name` is not in
    /// the registry and [`SchemaError::SchemaCompile`] if the schema itself
    /// is malformed.
    pub fn check_value(
        &self,
        value: &Value,
        schema_name: &str,
    ) -> Result<Vec<Violation>, SchemaError> {
        let schema = self
            .schemas
            .get(schema_name)
            .ok_or_else(|| SchemaError::SchemaNotFound(schema_name.to_string()))?;

        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .build(schema)
            .map_err(|e| SchemaError::SchemaCompile {
                schema: schema_name.to_string(),
                reason: e.to_string(),
            })?;

        let violations = validator
            .iter_errors(value)
            .map(|err| Violation {
                instance_path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect();

        Ok(violations)
    }

    /// Check a document against the schema its filename dictates.
    pub fn check_for_kind(
        &self,
        value: &Value,
        kind: &FileKind,
    ) -> Result<Vec<Violation>, SchemaError> {
        self.check_value(value, schema_name_for(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::{Language, QuestionType};
    use serde_json::json;

    /// The repository root, where `schemas/` lives.
    fn repo_root() -> PathBuf {
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop(); // crates/
        dir.pop(); // repo root
        dir
    }

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new(repo_root().join("schemas")).expect("failed to load schemas")
    }

    fn valid_meta() -> Value {
        json!({
            "name": "AI Fundamentals",
            "description": "Core concepts of machine learning.",
            "instructions": "Answer every question.",
            "ai_instructions": "Grade on conceptual accuracy."
        })
    }

    #[test]
    fn loads_all_five_schemas() {
        let reg = registry();
        assert_eq!(reg.schema_count(), 5);
        let names = reg.schema_names();
        assert!(names.contains(&"meta.schema.json"));
        assert!(names.contains(&"settings.schema.json"));
        assert!(names.contains(&"question.mcq.schema.json"));
        assert!(names.contains(&"question.open_text.schema.json"));
        assert!(names.contains(&"question.chat.schema.json"));
    }

    #[test]
    fn schema_name_mapping_covers_every_kind() {
        let reg = registry();
        let kinds = [
            FileKind::Meta(Language::En),
            FileKind::Settings,
            FileKind::Question {
                seq: 1,
                qtype: QuestionType::Mcq,
                lang: Language::En,
            },
            FileKind::Question {
                seq: 1,
                qtype: QuestionType::OpenText,
                lang: Language::Ru,
            },
            FileKind::Question {
                seq: 1,
                qtype: QuestionType::Chat,
                lang: Language::En,
            },
        ];
        for kind in kinds {
            assert!(
                reg.get_schema(schema_name_for(&kind)).is_some(),
                "no schema loaded for {kind:?}"
            );
        }
    }

    #[test]
    fn valid_meta_passes() {
        let violations = registry()
            .check_value(&valid_meta(), "meta.schema.json")
            .unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn meta_missing_field_is_reported() {
        let mut doc = valid_meta();
        doc.as_object_mut().unwrap().remove("ai_instructions");
        let violations = registry().check_value(&doc, "meta.schema.json").unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("ai_instructions"));
    }

    #[test]
    fn meta_empty_string_is_reported() {
        let mut doc = valid_meta();
        doc["name"] = json!("");
        let violations = registry().check_value(&doc, "meta.schema.json").unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].instance_path, "/name");
    }

    #[test]
    fn meta_unknown_field_is_rejected() {
        let mut doc = valid_meta();
        doc["author"] = json!("anonymous");
        let violations = registry().check_value(&doc, "meta.schema.json").unwrap();
        assert!(!violations.is_empty());
    }

    #[test]
    fn empty_settings_conform() {
        let violations = registry()
            .check_value(&json!({}), "settings.schema.json")
            .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn settings_accept_the_full_surface() {
        let doc = json!({
            "time_limit_minutes": 45,
            "randomize_order": true,
            "max_score": 10,
            "mode": "exam",
            "passing_score": 7.5,
            "passing_mode": "all",
            "include_previous_context": true,
            "context_depth": 3,
            "show_ai_recommendation": false,
            "enable_final_overview": true,
            "final_overview_replace_score": false,
            "final_overview_student_visible": true,
            "final_overview_teacher_visible": true,
            "research": {
                "pre_commitment_enabled": true,
                "pre_commitment_frequency": 2,
                "ai_suggestions_enabled": true,
                "ai_suggestion_frequency": 1,
                "ai_suggestion_types": ["hint", "counterexample"]
            }
        });
        let violations = registry()
            .check_value(&doc, "settings.schema.json")
            .unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn settings_context_depth_accepts_all_keyword() {
        let reg = registry();
        for depth in [json!("all"), json!(5)] {
            let violations = reg
                .check_value(&json!({ "context_depth": depth }), "settings.schema.json")
                .unwrap();
            assert!(violations.is_empty(), "context_depth {depth} should pass");
        }
        let violations = reg
            .check_value(&json!({ "context_depth": "some" }), "settings.schema.json")
            .unwrap();
        assert!(!violations.is_empty());
        let violations = reg
            .check_value(&json!({ "context_depth": 0 }), "settings.schema.json")
            .unwrap();
        assert!(!violations.is_empty());
    }

    #[test]
    fn settings_reject_unknown_mode() {
        let violations = registry()
            .check_value(&json!({ "mode": "speedrun" }), "settings.schema.json")
            .unwrap();
        assert!(!violations.is_empty());
    }

    fn valid_mcq() -> Value {
        json!({
            "text": "Which of these is supervised learning?",
            "difficulty": 2,
            "correct_answer": "Classification with labeled examples.",
            "options": ["Clustering", "Classification", "Dimensionality reduction"],
            "allow_multiple": false,
            "correct_index": 1
        })
    }

    #[test]
    fn valid_mcq_passes() {
        let violations = registry()
            .check_value(&valid_mcq(), "question.mcq.schema.json")
            .unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn difficulty_out_of_range_is_reported() {
        let reg = registry();
        for bad in [0, 6] {
            let mut doc = valid_mcq();
            doc["difficulty"] = json!(bad);
            let violations = reg
                .check_value(&doc, "question.mcq.schema.json")
                .unwrap();
            assert_eq!(violations.len(), 1, "difficulty {bad} should fail");
            assert_eq!(violations[0].instance_path, "/difficulty");
        }
    }

    #[test]
    fn suggestion_score_out_of_range_is_reported() {
        let mut doc = valid_mcq();
        doc["ai_suggestions"] = json!([{ "score": 1.5, "text": "Too strong" }]);
        let violations = registry()
            .check_value(&doc, "question.mcq.schema.json")
            .unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].instance_path, "/ai_suggestions/0/score");
    }

    #[test]
    fn single_option_mcq_is_rejected() {
        let mut doc = valid_mcq();
        doc["options"] = json!(["Only one"]);
        doc["correct_index"] = json!(0);
        let violations = registry()
            .check_value(&doc, "question.mcq.schema.json")
            .unwrap();
        assert!(!violations.is_empty());
    }

    #[test]
    fn chat_schema_rejects_explanation() {
        let doc = json!({
            "text": "Discuss overfitting.",
            "difficulty": 3,
            "correct_answer": "Mentions generalization and validation data.",
            "explanation": "chat has no explanation"
        });
        let violations = registry()
            .check_value(&doc, "question.chat.schema.json")
            .unwrap();
        assert!(!violations.is_empty());
    }

    #[test]
    fn multiple_violations_are_all_reported() {
        let doc = json!({
            "text": "",
            "difficulty": 9,
            "correct_answer": "x",
            "options": ["a", "b"],
            "allow_multiple": false
        });
        let violations = registry()
            .check_value(&doc, "question.mcq.schema.json")
            .unwrap();
        assert!(
            violations.len() >= 2,
            "expected both the empty text and the difficulty to be reported: {violations:?}"
        );
    }

    #[test]
    fn unknown_schema_is_a_registry_error() {
        let err = registry()
            .check_value(&json!({}), "question.essay.schema.json")
            .unwrap_err();
        assert!(matches!(err, SchemaError::SchemaNotFound(_)));
    }

    #[test]
    fn missing_schema_dir_is_a_load_error() {
        let err = SchemaRegistry::new("/nonexistent/schemas").unwrap_err();
        assert!(matches!(err, SchemaError::SchemaLoad { .. }));
    }

    #[test]
    fn unparsable_schema_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.schema.json"), "{ not json").unwrap();
        let err = SchemaRegistry::new(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaError::SchemaLoad { .. }));
    }

    #[test]
    fn non_schema_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "docs").unwrap();
        std::fs::write(dir.path().join("data.json"), "{}").unwrap();
        let reg = SchemaRegistry::new(dir.path()).unwrap();
        assert_eq!(reg.schema_count(), 0);
    }

    #[test]
    fn violation_display_marks_the_root() {
        let v = Violation {
            instance_path: String::new(),
            message: "\"name\" is a required property".to_string(),
        };
        assert!(v.to_string().starts_with("(root)"));

        let v = Violation {
            instance_path: "/difficulty".to_string(),
            message: "9 is greater than the maximum of 5".to_string(),
        };
        assert!(v.to_string().starts_with("/difficulty:"));
    }
}
