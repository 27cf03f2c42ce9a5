//! # Validation Driver
//!
//! Ties the tiers together: loads a directory into its aggregate (Tier 1),
//! applies the business rules (Tier 2), and iterates test directories for
//! batch runs with per-directory isolation.

use std::path::{Path, PathBuf};

use mentor_core::parse_file_name;
use mentor_schema::{schema_name_for, SchemaError, SchemaRegistry};

use crate::aggregate::TestDirectory;
use crate::report::{BatchReport, DirectoryReport, FindingKind};
use crate::rules;

/// Validates test directories against the loaded schema corpus.
#[derive(Debug)]
pub struct Validator {
    registry: SchemaRegistry,
}

impl Validator {
    /// Wrap an already-loaded schema registry.
    pub fn new(registry: SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Load schemas from `schema_dir` and build a validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the schema directory cannot be loaded;
    /// without the contracts there is nothing to validate against.
    pub fn from_schema_dir(schema_dir: impl Into<PathBuf>) -> Result<Self, SchemaError> {
        Ok(Self::new(SchemaRegistry::new(schema_dir)?))
    }

    /// The schema registry in use.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Validate one test directory, collecting every finding in one pass.
    ///
    /// Never mutates the directory. The returned report's `ok()` is false
    /// iff any error-severity finding was recorded.
    pub fn validate_dir(&self, dir: &Path) -> DirectoryReport {
        let mut report = DirectoryReport::new(dir);

        if !dir.is_dir() {
            report.error(
                FindingKind::Structural,
                format!("not a directory: {}", dir.display()),
            );
            return report;
        }

        tracing::debug!(dir = %dir.display(), "validating test directory");

        let aggregate = TestDirectory::load(dir, &self.registry, &mut report);
        rules::apply_business_rules(&aggregate, &mut report);

        tracing::debug!(
            dir = %dir.display(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validation finished"
        );

        report
    }

    /// Validate a single file against its schema (Tier 1 only).
    ///
    /// Useful while authoring one question; cross-file rules need the whole
    /// directory and are not applied here.
    pub fn validate_file(&self, path: &Path) -> DirectoryReport {
        let parent = path.parent().unwrap_or(Path::new("."));
        let mut report = DirectoryReport::new(parent);

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            report.error(
                FindingKind::Structural,
                format!("not a file path: {}", path.display()),
            );
            return report;
        };

        let Some(kind) = parse_file_name(name) else {
            report.error_in(
                FindingKind::Structural,
                name,
                "unrecognized file name; expected meta.{lang}.json, settings.json, or q{NN}.{type}.{lang}.json",
            );
            return report;
        };

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                report.error_in(FindingKind::Structural, name, format!("cannot read file: {e}"));
                return report;
            }
        };
        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                report.error_in(FindingKind::Structural, name, format!("invalid JSON: {e}"));
                return report;
            }
        };

        match self.registry.check_value(&value, schema_name_for(&kind)) {
            Ok(violations) => {
                for v in violations {
                    report.error_in(FindingKind::Schema, name, v.to_string());
                }
            }
            Err(e) => report.error_in(FindingKind::Structural, name, e.to_string()),
        }

        report
    }

    /// Validate every test directory under `tests_root`.
    ///
    /// Directories are independent units of work: one directory's failure
    /// never stops the rest, and the batch result's `ok()` is the AND over
    /// all directories.
    pub fn validate_all(&self, tests_root: &Path) -> BatchReport {
        let dirs = Self::find_test_dirs(tests_root);
        tracing::debug!(
            root = %tests_root.display(),
            count = dirs.len(),
            "discovered test directories"
        );

        BatchReport {
            directories: dirs.iter().map(|d| self.validate_dir(d)).collect(),
        }
    }

    /// Recursively find test directories (those containing `settings.json`)
    /// under a tests root, sorted for deterministic batch order.
    pub fn find_test_dirs(tests_root: &Path) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        walk_for_test_dirs(tests_root, &mut dirs);
        dirs.sort();
        dirs
    }
}

fn walk_for_test_dirs(dir: &Path, acc: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "cannot read directory during discovery");
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.join("settings.json").is_file() {
                acc.push(path.clone());
            }
            walk_for_test_dirs(&path, acc);
        }
    }
}
