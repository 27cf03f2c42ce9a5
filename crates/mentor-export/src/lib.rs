//! # mentor-export — Platform Export
//!
//! Merges a validated test directory into the single JSON document the
//! platform imports (`format_version` 1): per-language files collapse into
//! `{en, ru}` objects, question pairs into one ordered entry each, and
//! settings into a fully-defaulted object.
//!
//! ## Design
//!
//! The exporter runs the validator first by default and surfaces its
//! findings unchanged; it never re-derives what is wrong. The
//! `--skip-validation` escape hatch exists for fast authoring loops only;
//! on invalid input the exporter is best-effort, but it still aborts a
//! directory rather than emit a partially-merged document.
//!
//! Defaults are materialized here and only here. The validator must keep
//! "absent" observable; downstream consumers want a complete settings
//! object. Both are right, so the authored [`Settings`] and the resolved
//! [`ResolvedSettings`] are different types.

pub mod exporter;
pub mod settings;
pub mod wire;

pub use exporter::{output_name, ExportError, Exporter};
pub use settings::{
    ContextDepth, PassingMode, ResearchSettings, ResolvedResearchSettings, ResolvedSettings,
    ScoringMode, Settings,
};
pub use wire::{
    ChatData, ExportedQuestion, ExportedTest, I18nText, McqData, MergedSuggestion, OpenTextData,
    QuestionData, FORMAT_VERSION,
};
