//! # Export Pipeline
//!
//! Reads a test directory, merges the language pairs, and produces an
//! [`ExportedTest`]. Validation runs first unless explicitly skipped; the
//! exporter re-reads files itself rather than borrowing the validator's
//! aggregate, because it must also function (best-effort) when validation
//! is skipped.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use mentor_core::{
    parse_file_name, question_file_name, question_label, ChatQuestion, FileKind, Language,
    McqQuestion, Metadata, OpenTextQuestion, QuestionType,
};
use mentor_schema::SchemaError;
use mentor_validate::{DirectoryReport, Validator};

use crate::settings::Settings;
use crate::wire::{
    ChatData, ExportedQuestion, ExportedTest, I18nText, McqData, MergedSuggestion, OpenTextData,
    QuestionData, FORMAT_VERSION,
};

/// Errors that abort one directory's export.
///
/// The defensive variants (`Decode`, `PresenceMismatch`, ...) exist for
/// `--skip-validation` runs and as a backstop: the exporter aborts with a
/// field-level error instead of emitting a partially-merged document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The pre-export validation pass found errors; the findings are
    /// carried verbatim so callers can surface them.
    #[error("validation failed with {} error(s)", .report.error_count())]
    Validation {
        /// The validator's full report for the directory.
        report: DirectoryReport,
    },

    /// A file the merge needs does not exist.
    #[error("missing required file: {}", .path.display())]
    MissingFile {
        /// The absent file.
        path: PathBuf,
    },

    /// A file exists but could not be read.
    #[error("cannot read {}: {reason}", .path.display())]
    Read {
        /// The unreadable file.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// A file's contents do not decode into the expected shape. The reason
    /// names the offending field.
    #[error("{file}: {reason}")]
    Decode {
        /// Filename relative to the test directory.
        file: String,
        /// Decoder message, including the field path.
        reason: String,
    },

    /// A translatable field exists in one language only; merging would
    /// have to invent or drop text.
    #[error("{context}: '{field}' is present in {present} but missing in {missing}")]
    PresenceMismatch {
        /// Question label or "meta".
        context: String,
        /// The offending field.
        field: String,
        /// The language that has the field.
        present: Language,
        /// The language that lacks it.
        missing: Language,
    },

    /// The suggestion lists cannot be merged index-wise.
    #[error("{context}: ai_suggestions count mismatch (en {en}, ru {ru})")]
    SuggestionCount {
        /// Question label.
        context: String,
        /// Number of EN suggestions.
        en: usize,
        /// Number of RU suggestions.
        ru: usize,
    },

    /// The MCQ option lists cannot be merged index-wise.
    #[error("{context}: options length mismatch (en {en}, ru {ru})")]
    OptionsLength {
        /// Question label.
        context: String,
        /// Number of EN options.
        en: usize,
        /// Number of RU options.
        ru: usize,
    },
}

/// Merges validated test directories into the platform wire format.
#[derive(Debug)]
pub struct Exporter {
    validator: Validator,
}

impl Exporter {
    /// Wrap an existing validator.
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    /// Load schemas from `schema_dir` and build an exporter.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the schema directory cannot be loaded.
    pub fn from_schema_dir(schema_dir: impl Into<PathBuf>) -> Result<Self, SchemaError> {
        Ok(Self::new(Validator::from_schema_dir(schema_dir)?))
    }

    /// The validator used for pre-export checks.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Export one test directory.
    ///
    /// Runs the validator first unless `skip_validation` is set; with the
    /// check skipped the merge is best-effort and aborts on the first
    /// unmergeable field instead of guessing.
    ///
    /// # Errors
    ///
    /// [`ExportError::Validation`] carries the validator's findings; every
    /// other variant names the file or field that stopped the merge.
    pub fn export_dir(
        &self,
        dir: &Path,
        skip_validation: bool,
    ) -> Result<ExportedTest, ExportError> {
        if !skip_validation {
            let report = self.validator.validate_dir(dir);
            if !report.ok() {
                return Err(ExportError::Validation { report });
            }
        }

        tracing::debug!(dir = %dir.display(), "exporting test directory");

        let meta_en: Metadata = read_typed(dir, "meta.en.json")?;
        let meta_ru: Metadata = read_typed(dir, "meta.ru.json")?;
        let settings: Settings = read_typed(dir, "settings.json")?;

        let mut questions = Vec::new();
        for ((seq, qtype), sides) in discover_question_pairs(dir)? {
            questions.push(merge_pair(dir, seq, qtype, &sides)?);
        }

        Ok(ExportedTest {
            format_version: FORMAT_VERSION,
            name: I18nText::new(meta_en.name, meta_ru.name),
            description: I18nText::new(meta_en.description, meta_ru.description),
            instructions: I18nText::new(meta_en.instructions, meta_ru.instructions),
            ai_instructions: I18nText::new(meta_en.ai_instructions, meta_ru.ai_instructions),
            final_overview_instructions: merge_optional(
                "meta",
                "final_overview_instructions",
                meta_en.final_overview_instructions,
                meta_ru.final_overview_instructions,
            )?,
            settings: settings.resolve(),
            questions,
        })
    }

    /// Export every test directory under `tests_root`.
    ///
    /// One result per directory, in discovery order; a failing directory
    /// never stops the rest.
    pub fn export_all(
        &self,
        tests_root: &Path,
        skip_validation: bool,
    ) -> Vec<(PathBuf, Result<ExportedTest, ExportError>)> {
        Validator::find_test_dirs(tests_root)
            .into_iter()
            .map(|dir| {
                let result = self.export_dir(&dir, skip_validation);
                (dir, result)
            })
            .collect()
    }
}

/// Batch-mode output filename for a test directory:
/// `tests/ai/fundamentals` becomes `ai__fundamentals.json`.
pub fn output_name(test_dir: &Path, tests_root: &Path) -> String {
    let rel = test_dir.strip_prefix(tests_root).unwrap_or(test_dir);
    let parts: Vec<&str> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        "test.json".to_string()
    } else {
        format!("{}.json", parts.join("__"))
    }
}

fn read_typed<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T, ExportError> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(ExportError::MissingFile { path });
    }
    let content = std::fs::read_to_string(&path).map_err(|e| ExportError::Read {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| ExportError::Decode {
        file: name.to_string(),
        reason: e.to_string(),
    })
}

type PairInventory = BTreeMap<(u32, QuestionType), BTreeMap<Language, String>>;

fn discover_question_pairs(dir: &Path) -> Result<PairInventory, ExportError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ExportError::Read {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut pairs: PairInventory = BTreeMap::new();
    for entry in entries.flatten() {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if let Some(FileKind::Question { seq, qtype, lang }) = parse_file_name(&name) {
            pairs.entry((seq, qtype)).or_default().insert(lang, name);
        }
    }
    Ok(pairs)
}

fn merge_pair(
    dir: &Path,
    seq: u32,
    qtype: QuestionType,
    sides: &BTreeMap<Language, String>,
) -> Result<ExportedQuestion, ExportError> {
    for lang in Language::ALL {
        if !sides.contains_key(&lang) {
            return Err(ExportError::MissingFile {
                path: dir.join(question_file_name(seq, qtype, lang)),
            });
        }
    }
    let en_name = &sides[&Language::En];
    let ru_name = &sides[&Language::Ru];
    let label = question_label(seq, qtype);

    let question_data = match qtype {
        QuestionType::Mcq => QuestionData::Mcq(merge_mcq(
            &label,
            read_typed(dir, en_name)?,
            read_typed(dir, ru_name)?,
        )?),
        QuestionType::OpenText => QuestionData::OpenText(merge_open_text(
            &label,
            read_typed(dir, en_name)?,
            read_typed(dir, ru_name)?,
        )?),
        QuestionType::Chat => QuestionData::Chat(merge_chat(
            &label,
            read_typed(dir, en_name)?,
            read_typed(dir, ru_name)?,
        )?),
    };

    Ok(ExportedQuestion {
        sequence_number: seq,
        question_type: qtype,
        question_data,
    })
}

fn merge_mcq(label: &str, en: McqQuestion, ru: McqQuestion) -> Result<McqData, ExportError> {
    if en.options.len() != ru.options.len() {
        return Err(ExportError::OptionsLength {
            context: label.to_string(),
            en: en.options.len(),
            ru: ru.options.len(),
        });
    }
    let options = en
        .options
        .into_iter()
        .zip(ru.options)
        .map(|(e, r)| I18nText::new(e, r))
        .collect();

    Ok(McqData {
        text: I18nText::new(en.text, ru.text),
        difficulty: en.difficulty,
        correct_answer: I18nText::new(en.correct_answer, ru.correct_answer),
        explanation: merge_optional(label, "explanation", en.explanation, ru.explanation)?,
        image_url: en.image_url.or(ru.image_url),
        ai_context: merge_optional(label, "ai_context", en.ai_context, ru.ai_context)?,
        ai_suggestions: merge_suggestions(label, en.ai_suggestions, ru.ai_suggestions)?,
        options,
        allow_multiple: en.allow_multiple,
        correct_index: en.correct_index,
        correct_indices: en.correct_indices,
    })
}

fn merge_open_text(
    label: &str,
    en: OpenTextQuestion,
    ru: OpenTextQuestion,
) -> Result<OpenTextData, ExportError> {
    Ok(OpenTextData {
        text: I18nText::new(en.text, ru.text),
        difficulty: en.difficulty,
        correct_answer: I18nText::new(en.correct_answer, ru.correct_answer),
        explanation: merge_optional(label, "explanation", en.explanation, ru.explanation)?,
        image_url: en.image_url.or(ru.image_url),
        ai_context: merge_optional(label, "ai_context", en.ai_context, ru.ai_context)?,
        ai_suggestions: merge_suggestions(label, en.ai_suggestions, ru.ai_suggestions)?,
        min_words: en.min_words,
        max_length: en.max_length,
    })
}

fn merge_chat(label: &str, en: ChatQuestion, ru: ChatQuestion) -> Result<ChatData, ExportError> {
    Ok(ChatData {
        text: I18nText::new(en.text, ru.text),
        difficulty: en.difficulty,
        correct_answer: I18nText::new(en.correct_answer, ru.correct_answer),
        image_url: en.image_url.or(ru.image_url),
        ai_context: merge_optional(label, "ai_context", en.ai_context, ru.ai_context)?,
        ai_suggestions: merge_suggestions(label, en.ai_suggestions, ru.ai_suggestions)?,
        max_turns: en.max_turns,
        min_words_per_turn: en.min_words_per_turn,
    })
}

/// Merge an optional translatable field; presence must agree.
fn merge_optional(
    context: &str,
    field: &str,
    en: Option<String>,
    ru: Option<String>,
) -> Result<Option<I18nText>, ExportError> {
    match (en, ru) {
        (None, None) => Ok(None),
        (Some(e), Some(r)) => Ok(Some(I18nText::new(e, r))),
        (Some(_), None) => Err(ExportError::PresenceMismatch {
            context: context.to_string(),
            field: field.to_string(),
            present: Language::En,
            missing: Language::Ru,
        }),
        (None, Some(_)) => Err(ExportError::PresenceMismatch {
            context: context.to_string(),
            field: field.to_string(),
            present: Language::Ru,
            missing: Language::En,
        }),
    }
}

/// Merge suggestion lists index-wise: score from EN (Tier 2 guarantees
/// parity), text from both sides.
fn merge_suggestions(
    context: &str,
    en: Option<Vec<mentor_core::AiSuggestion>>,
    ru: Option<Vec<mentor_core::AiSuggestion>>,
) -> Result<Option<Vec<MergedSuggestion>>, ExportError> {
    match (en, ru) {
        (None, None) => Ok(None),
        (Some(en), Some(ru)) => {
            if en.len() != ru.len() {
                return Err(ExportError::SuggestionCount {
                    context: context.to_string(),
                    en: en.len(),
                    ru: ru.len(),
                });
            }
            Ok(Some(
                en.into_iter()
                    .zip(ru)
                    .map(|(e, r)| MergedSuggestion {
                        score: e.score,
                        text: I18nText::new(e.text, r.text),
                    })
                    .collect(),
            ))
        }
        (Some(_), None) => Err(ExportError::PresenceMismatch {
            context: context.to_string(),
            field: "ai_suggestions".to_string(),
            present: Language::En,
            missing: Language::Ru,
        }),
        (None, Some(_)) => Err(ExportError::PresenceMismatch {
            context: context.to_string(),
            field: "ai_suggestions".to_string(),
            present: Language::Ru,
            missing: Language::En,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_joins_path_segments() {
        assert_eq!(
            output_name(Path::new("tests/ai/fundamentals"), Path::new("tests")),
            "ai__fundamentals.json"
        );
        assert_eq!(
            output_name(Path::new("tests/lang/grammar/cases"), Path::new("tests")),
            "lang__grammar__cases.json"
        );
        // A directory outside the tests root still gets a usable name.
        assert_eq!(
            output_name(Path::new("/elsewhere/solo"), Path::new("tests")),
            "elsewhere__solo.json"
        );
    }

    #[test]
    fn merge_optional_rejects_one_sided_fields() {
        let err = merge_optional("q01.mcq", "explanation", Some("x".into()), None).unwrap_err();
        assert!(matches!(err, ExportError::PresenceMismatch { .. }));
        assert!(err.to_string().contains("'explanation'"));
        assert!(err.to_string().contains("present in en but missing in ru"));

        assert!(merge_optional("q01.mcq", "explanation", None, None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn merge_suggestions_takes_score_from_en() {
        use mentor_core::AiSuggestion;
        let merged = merge_suggestions(
            "q01.mcq",
            Some(vec![AiSuggestion {
                score: 0.9,
                text: "Hint".into(),
            }]),
            Some(vec![AiSuggestion {
                score: 0.9,
                text: "Подсказка".into(),
            }]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].score, 0.9);
        assert_eq!(merged[0].text.en, "Hint");
        assert_eq!(merged[0].text.ru, "Подсказка");
    }
}
