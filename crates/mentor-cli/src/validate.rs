//! # Validate Subcommand
//!
//! Checks test directories against the schemas and cross-language rules.
//! Matches the behavior of `python tools/validate.py`: one directory, one
//! file, or `--all`, with every finding printed and an exit code CI can
//! trust.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use mentor_validate::{DirectoryReport, Validator};

/// Arguments for the `mentor validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to a test directory or a single JSON file to validate.
    #[arg(value_name = "PATH")]
    pub target: Option<std::path::PathBuf>,

    /// Validate every test directory under tests/.
    #[arg(long)]
    pub all: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure, 2 on
/// operational error.
pub fn run_validate(args: &ValidateArgs, repo_root: &Path) -> Result<u8> {
    let validator = Validator::from_schema_dir(repo_root.join("schemas"))
        .context("failed to load JSON schemas")?;

    tracing::info!(
        schema_count = validator.registry().schema_count(),
        "loaded schema registry"
    );

    if args.all {
        return validate_all(&validator, repo_root);
    }

    let Some(ref target) = args.target else {
        println!("Usage: mentor validate [--all] [PATH]");
        return Ok(2);
    };

    let resolved = crate::resolve_path(target, repo_root);
    let report = if resolved.is_file() {
        validator.validate_file(&resolved)
    } else if resolved.is_dir() {
        validator.validate_dir(&resolved)
    } else {
        println!("ERROR: target not found: {}", target.display());
        return Ok(2);
    };

    print_directory_report(&report, repo_root);
    Ok(u8::from(!report.ok()))
}

/// Validate every test directory under `tests/` and print a summary.
fn validate_all(validator: &Validator, repo_root: &Path) -> Result<u8> {
    let tests_root = repo_root.join("tests");
    let batch = validator.validate_all(&tests_root);

    if batch.directories.is_empty() {
        println!("No test directories found under {}", tests_root.display());
        return Ok(1);
    }

    for report in &batch.directories {
        print_directory_report(report, repo_root);
    }

    let total = batch.directories.len();
    let passed = total - batch.failed_count();
    println!("Tests: {passed}/{total} passed");

    Ok(u8::from(!batch.ok()))
}

/// Print one directory's findings and its OK/FAIL summary line.
///
/// The `OK:`/`FAIL:` prefixes are load-bearing: CI pipelines grep them.
pub fn print_directory_report(report: &DirectoryReport, repo_root: &Path) {
    let rel = report.dir.strip_prefix(repo_root).unwrap_or(&report.dir);

    for finding in &report.findings {
        println!("  {finding}");
    }

    let errors = report.error_count();
    let warnings = report.warning_count();
    if report.ok() {
        if warnings == 0 {
            println!("OK: {}", rel.display());
        } else {
            println!("OK: {} ({warnings} warning(s))", rel.display());
        }
    } else {
        println!(
            "FAIL: {} ({errors} error(s), {warnings} warning(s))",
            rel.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    /// The repository root, where `schemas/` lives.
    fn repo_root() -> PathBuf {
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop(); // crates/
        dir.pop(); // repo root
        dir
    }

    /// Build a fake repo root with real schemas and an empty tests tree.
    fn scratch_root() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let schema_dir = tmp.path().join("schemas");
        std::fs::create_dir_all(&schema_dir).unwrap();
        for name in std::fs::read_dir(repo_root().join("schemas")).unwrap() {
            let path = name.unwrap().path();
            std::fs::copy(&path, schema_dir.join(path.file_name().unwrap())).unwrap();
        }
        std::fs::create_dir_all(tmp.path().join("tests")).unwrap();
        tmp
    }

    #[test]
    fn no_target_and_no_all_prints_usage_and_returns_2() {
        let root = scratch_root();
        let args = ValidateArgs {
            target: None,
            all: false,
        };
        assert_eq!(run_validate(&args, root.path()).unwrap(), 2);
    }

    #[test]
    fn missing_target_returns_2() {
        let root = scratch_root();
        let args = ValidateArgs {
            target: Some("tests/no/such".into()),
            all: false,
        };
        assert_eq!(run_validate(&args, root.path()).unwrap(), 2);
    }

    #[test]
    fn all_with_no_test_dirs_returns_1() {
        let root = scratch_root();
        let args = ValidateArgs {
            target: None,
            all: true,
        };
        assert_eq!(run_validate(&args, root.path()).unwrap(), 1);
    }

    #[test]
    fn single_file_validation_returns_0_for_a_clean_file() {
        let root = scratch_root();
        let dir = root.path().join("tests/ai/solo");
        std::fs::create_dir_all(&dir).unwrap();
        let meta = json!({
            "name": "T",
            "description": "D",
            "instructions": "I",
            "ai_instructions": "A"
        });
        std::fs::write(
            dir.join("meta.en.json"),
            serde_json::to_string_pretty(&meta).unwrap(),
        )
        .unwrap();

        let args = ValidateArgs {
            target: Some(dir.join("meta.en.json")),
            all: false,
        };
        assert_eq!(run_validate(&args, root.path()).unwrap(), 0);
    }

    #[test]
    fn broken_schema_dir_is_an_operational_error() {
        let tmp = tempfile::tempdir().unwrap();
        // No schemas/ at all.
        let args = ValidateArgs {
            target: None,
            all: true,
        };
        assert!(run_validate(&args, tmp.path()).is_err());
    }
}
