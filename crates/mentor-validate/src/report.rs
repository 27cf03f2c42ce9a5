//! # Findings and Reports
//!
//! Validation output is a flat list of findings per directory, each tagged
//! with a severity and a kind. Errors fail the directory; warnings are
//! advisory and never affect the success flag, so callers can distinguish
//! "validated with notes" from "failed".

use std::fmt;
use std::path::{Path, PathBuf};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The directory cannot be exported until this is fixed.
    Error,
    /// Advisory only; does not fail validation.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Warning => f.write_str("WARNING"),
        }
    }
}

/// What layer of checking produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// Malformed JSON, unrecognized filename, or a missing required file.
    Structural,
    /// A per-file schema violation: field missing, wrong type, out of range.
    Schema,
    /// A cross-language rule violation: pairing, numbering, field parity.
    Parity,
    /// An MCQ answer index outside its options, or the wrong answer field
    /// for the `allow_multiple` setting.
    Bounds,
}

/// One validation finding.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Severity of the finding.
    pub severity: Severity,
    /// The rule layer that produced it.
    pub kind: FindingKind,
    /// Filename relative to the test directory, when the finding is
    /// file-scoped. Directory-scoped findings (missing files, numbering)
    /// carry `None`.
    pub file: Option<String>,
    /// Human-readable description, specific enough to fix the content
    /// without re-running with more verbosity.
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}: {}: {}", self.severity, file, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// All findings for one test directory.
#[derive(Debug)]
pub struct DirectoryReport {
    /// The directory that was validated.
    pub dir: PathBuf,
    /// Findings in the order they were discovered.
    pub findings: Vec<Finding>,
}

impl DirectoryReport {
    /// Create an empty report for a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            findings: Vec::new(),
        }
    }

    /// True when there are no error-severity findings. Warnings do not
    /// affect this.
    pub fn ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Number of error-severity findings.
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity findings.
    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// Record a directory-scoped error.
    pub fn error(&mut self, kind: FindingKind, message: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Error,
            kind,
            file: None,
            message: message.into(),
        });
    }

    /// Record an error scoped to a file inside the directory.
    pub fn error_in(
        &mut self,
        kind: FindingKind,
        file: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.findings.push(Finding {
            severity: Severity::Error,
            kind,
            file: Some(file.into()),
            message: message.into(),
        });
    }

    /// Record a directory-scoped warning.
    pub fn warning(&mut self, kind: FindingKind, message: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Warning,
            kind,
            file: None,
            message: message.into(),
        });
    }

    /// Record a warning scoped to a file inside the directory.
    pub fn warning_in(
        &mut self,
        kind: FindingKind,
        file: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.findings.push(Finding {
            severity: Severity::Warning,
            kind,
            file: Some(file.into()),
            message: message.into(),
        });
    }
}

/// Reports for a batch of directories.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One report per validated directory, in discovery order.
    pub directories: Vec<DirectoryReport>,
}

impl BatchReport {
    /// True when every directory validated without errors.
    pub fn ok(&self) -> bool {
        self.directories.iter().all(DirectoryReport::ok)
    }

    /// Number of directories that failed.
    pub fn failed_count(&self) -> usize {
        self.directories.iter().filter(|r| !r.ok()).count()
    }

    /// Look up the report for a specific directory.
    pub fn for_dir(&self, dir: &Path) -> Option<&DirectoryReport> {
        self.directories.iter().find(|r| r.dir == dir)
    }
}
