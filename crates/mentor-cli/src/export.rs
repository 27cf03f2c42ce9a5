//! # Export Subcommand
//!
//! Merges validated test directories into the platform import format.
//! Matches the behavior of `python tools/export.py`: stdout by default,
//! `-o` for a file or directory, `--all` for the whole tree, and
//! `--skip-validation` for fast authoring loops.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mentor_export::{output_name, ExportError, ExportedTest, Exporter};

use crate::validate::print_directory_report;

/// Arguments for the `mentor export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to the test directory to export.
    #[arg(value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Export every test directory under tests/.
    #[arg(long)]
    pub all: bool,

    /// Output file path (or directory when using --all). Omit for stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Skip the validation pre-check (not recommended; export output is
    /// best-effort on invalid content).
    #[arg(long)]
    pub skip_validation: bool,
}

/// Execute the export subcommand.
///
/// Returns exit code: 0 on success, 1 on validation or transform failure,
/// 2 on operational error.
pub fn run_export(args: &ExportArgs, repo_root: &Path) -> Result<u8> {
    let exporter = Exporter::from_schema_dir(repo_root.join("schemas"))
        .context("failed to load JSON schemas")?;

    if args.all {
        return export_all(&exporter, args, repo_root);
    }

    let Some(ref target) = args.target else {
        println!("Usage: mentor export [--all] [-o PATH] [--skip-validation] [DIR]");
        return Ok(2);
    };

    let dir = crate::resolve_path(target, repo_root);
    if !dir.is_dir() {
        println!("ERROR: not a directory: {}", target.display());
        return Ok(2);
    }

    let doc = match exporter.export_dir(&dir, args.skip_validation) {
        Ok(doc) => doc,
        Err(e) => return Ok(report_export_error(&dir, e, repo_root)),
    };

    let out_path = args.output.as_ref().map(|out| {
        let out = crate::resolve_path(out, repo_root);
        if out.is_dir() {
            out.join(output_name(&dir, &repo_root.join("tests")))
        } else {
            out
        }
    });
    write_document(&doc, out_path.as_deref())?;

    Ok(0)
}

/// Export every test directory under `tests/`.
fn export_all(exporter: &Exporter, args: &ExportArgs, repo_root: &Path) -> Result<u8> {
    let tests_root = repo_root.join("tests");
    let results = exporter.export_all(&tests_root, args.skip_validation);

    if results.is_empty() {
        println!("No test directories found under {}", tests_root.display());
        return Ok(1);
    }

    let out_dir = args.output.as_ref().map(|out| crate::resolve_path(out, repo_root));

    let total = results.len();
    let mut failures = 0usize;
    for (dir, result) in results {
        match result {
            Ok(doc) => {
                let out_path = out_dir
                    .as_ref()
                    .map(|d| d.join(output_name(&dir, &tests_root)));
                write_document(&doc, out_path.as_deref())?;
            }
            Err(e) => {
                report_export_error(&dir, e, repo_root);
                failures += 1;
            }
        }
    }

    println!("Exported: {}/{total} tests", total - failures);
    Ok(u8::from(failures > 0))
}

/// Print an export failure; validation failures surface the validator's
/// findings rather than re-deriving them.
fn report_export_error(dir: &Path, error: ExportError, repo_root: &Path) -> u8 {
    let rel = dir.strip_prefix(repo_root).unwrap_or(dir);
    match error {
        ExportError::Validation { report } => {
            print_directory_report(&report, repo_root);
            println!("SKIP: {} (validation failed)", rel.display());
        }
        other => {
            println!("ERROR: {}: {other}", rel.display());
        }
    }
    1
}

/// Serialize a merged document to a file or stdout.
///
/// Pretty-printed UTF-8 with a trailing newline; parent directories are
/// created as needed.
fn write_document(doc: &ExportedTest, output: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(doc).context("failed to serialize document")? + "\n";

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported: {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
