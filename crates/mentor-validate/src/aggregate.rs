//! # Test Directory Aggregate
//!
//! Loads a whole test directory into memory, running Tier-1 (per-file
//! schema) checks along the way. The resulting [`TestDirectory`] is what
//! the Tier-2 business rules operate on; they never read the filesystem
//! themselves.
//!
//! A file's parsed value is retained only when its Tier 1 passed, so
//! Tier-2 rules automatically skip files that were already reported as
//! malformed while still seeing that the file exists (pairing and
//! completeness are presence-based).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use mentor_core::{parse_file_name, FileKind, Language, QuestionType};
use mentor_schema::SchemaRegistry;

use crate::report::{DirectoryReport, FindingKind};

/// One inventoried file: its name plus the parsed value, which is `None`
/// when the file failed Tier 1 (unparsable or schema-nonconforming).
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Filename relative to the test directory.
    pub name: String,
    /// Parsed JSON, present only when Tier 1 passed.
    pub value: Option<Value>,
}

impl LoadedFile {
    /// A file that passed Tier 1.
    pub fn clean(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }

    /// A file that exists but failed Tier 1.
    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// The two language sides of one question.
#[derive(Debug, Clone, Default)]
pub struct QuestionPair {
    /// Present sides keyed by language.
    pub sides: BTreeMap<Language, LoadedFile>,
}

impl QuestionPair {
    /// The parsed value of a side, if the file exists and passed Tier 1.
    pub fn value(&self, lang: Language) -> Option<&Value> {
        self.sides.get(&lang).and_then(|f| f.value.as_ref())
    }
}

/// Everything one test directory contains, keyed for the cross-file rules.
#[derive(Debug, Default)]
pub struct TestDirectory {
    /// The directory path.
    pub dir: PathBuf,
    /// Metadata files keyed by language.
    pub metas: BTreeMap<Language, LoadedFile>,
    /// The settings file, if present.
    pub settings: Option<LoadedFile>,
    /// Question sides grouped into pairs by `(sequence, type)`.
    pub questions: BTreeMap<(u32, QuestionType), QuestionPair>,
}

impl TestDirectory {
    /// Inventory `dir`, run Tier-1 checks on every recognized JSON file,
    /// and record findings into `report`.
    ///
    /// Malformed JSON and unrecognized `.json` names are structural errors
    /// for the affected file only; the rest of the directory is still
    /// loaded. Non-JSON files (readmes, editor droppings) are ignored.
    pub fn load(dir: &Path, registry: &SchemaRegistry, report: &mut DirectoryReport) -> Self {
        let mut aggregate = TestDirectory {
            dir: dir.to_path_buf(),
            ..TestDirectory::default()
        };

        let mut names: Vec<String> = match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .filter_map(|e| e.file_name().into_string().ok())
                .filter(|n| n.ends_with(".json"))
                .collect(),
            Err(e) => {
                report.error(
                    FindingKind::Structural,
                    format!("cannot read directory: {e}"),
                );
                return aggregate;
            }
        };
        names.sort();

        if names.is_empty() {
            report.error(
                FindingKind::Structural,
                "no JSON files found in test directory",
            );
            return aggregate;
        }

        for name in names {
            let Some(kind) = parse_file_name(&name) else {
                report.error_in(
                    FindingKind::Structural,
                    &name,
                    "unrecognized file name; expected meta.{lang}.json, settings.json, or q{NN}.{type}.{lang}.json",
                );
                continue;
            };

            let file = load_file(dir, &name, &kind, registry, report);
            aggregate.insert(kind, file);
        }

        aggregate
    }

    fn insert(&mut self, kind: FileKind, file: LoadedFile) {
        match kind {
            FileKind::Meta(lang) => {
                self.metas.insert(lang, file);
            }
            FileKind::Settings => {
                self.settings = Some(file);
            }
            FileKind::Question { seq, qtype, lang } => {
                self.questions
                    .entry((seq, qtype))
                    .or_default()
                    .sides
                    .insert(lang, file);
            }
        }
    }
}

/// Read and parse one file, apply its schema, and report any findings.
fn load_file(
    dir: &Path,
    name: &str,
    kind: &FileKind,
    registry: &SchemaRegistry,
    report: &mut DirectoryReport,
) -> LoadedFile {
    let path = dir.join(name);

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            report.error_in(FindingKind::Structural, name, format!("cannot read file: {e}"));
            return LoadedFile::failed(name);
        }
    };

    let value: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            report.error_in(FindingKind::Structural, name, format!("invalid JSON: {e}"));
            return LoadedFile::failed(name);
        }
    };

    match registry.check_for_kind(&value, kind) {
        Ok(violations) if violations.is_empty() => LoadedFile::clean(name, value),
        Ok(violations) => {
            for v in violations {
                report.error_in(FindingKind::Schema, name, v.to_string());
            }
            LoadedFile::failed(name)
        }
        Err(e) => {
            // A registry problem, surfaced per file so a batch run still
            // covers the remaining directories.
            report.error_in(FindingKind::Structural, name, e.to_string());
            LoadedFile::failed(name)
        }
    }
}
