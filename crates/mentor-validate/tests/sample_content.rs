//! Integration test: the sample content shipped under `tests/` at the
//! repository root must validate cleanly. This keeps the checked-in
//! examples honest the same way CI keeps authored content honest.

use std::path::PathBuf;

use mentor_validate::Validator;

/// The repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

#[test]
fn shipped_sample_content_validates_cleanly() {
    let root = repo_root();
    let validator =
        Validator::from_schema_dir(root.join("schemas")).expect("failed to load schemas");

    let dirs = Validator::find_test_dirs(&root.join("tests"));
    assert!(
        dirs.len() >= 2,
        "expected at least two sample test directories under tests/, found {}",
        dirs.len()
    );

    let batch = validator.validate_all(&root.join("tests"));
    for report in &batch.directories {
        assert!(
            report.ok(),
            "{} failed validation:\n{}",
            report.dir.display(),
            report
                .findings
                .iter()
                .map(|f| format!("  {f}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
    assert!(batch.ok());
}
