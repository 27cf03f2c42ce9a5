//! # mentor-cli — Content Toolchain CLI
//!
//! Provides the `mentor` command-line interface, replacing the Python
//! `tools/validate.py` and `tools/export.py` scripts with one structured
//! binary.
//!
//! ## Subcommands
//!
//! - `mentor validate` — check one test directory (or file, or all tests)
//!   against the schemas and cross-language rules.
//! - `mentor export` — merge validated test directories into the platform
//!   import format.
//!
//! ## Exit codes
//!
//! Both subcommands exit 0 on success, 1 when any content finding or
//! export failure occurred, and 2 on operational errors (missing schemas,
//! unwritable output, bad invocation).
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic; handlers delegate
//!   to the domain crates and only format output.
//! - Output stays stable: CI pipelines grep the `FAIL:`/`OK:` lines.

pub mod export;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve a path that may be relative to the repository root.
///
/// Absolute paths pass through. A relative path is tried against
/// `repo_root` first and falls back to the current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_prefers_the_repo_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("tests/ai")).unwrap();

        let resolved = resolve_path(Path::new("tests/ai"), root);
        assert_eq!(resolved, root.join("tests/ai"));

        // Nonexistent relative paths fall back unchanged.
        let resolved = resolve_path(Path::new("no/such/dir"), root);
        assert_eq!(resolved, PathBuf::from("no/such/dir"));

        // Absolute paths pass through.
        let abs = root.join("tests/ai");
        assert_eq!(resolve_path(&abs, Path::new("/elsewhere")), abs);
    }
}
