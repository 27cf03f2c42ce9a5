//! # mentor-core — Foundational Types
//!
//! Shared vocabulary for the mentor-tests toolchain: the closed language and
//! question-type sets, split-file name dispatch, and the typed authored data
//! model.
//!
//! ## Design
//!
//! A test lives on disk as a directory of small JSON files
//! (`meta.{lang}.json`, `settings.json`, `q{NN}.{type}.{lang}.json`). The
//! question variant is encoded in the filename, so [`filename`] maps a path
//! segment to a [`FileKind`] without touching file contents; everything
//! downstream dispatches on that parse.
//!
//! ## Crate Policy
//!
//! - No filesystem access and no I/O: pure types and parsing only.
//! - `Language` and `QuestionType` are the single source of truth for their
//!   sets. Every `match` on them must stay exhaustive so adding a language
//!   or question type forces each consumer to handle it at compile time.

pub mod error;
pub mod filename;
pub mod language;
pub mod model;
pub mod question;

pub use error::ParseError;
pub use filename::{parse_file_name, question_file_name, question_label, FileKind};
pub use language::Language;
pub use model::{AiSuggestion, ChatQuestion, McqQuestion, Metadata, OpenTextQuestion};
pub use question::QuestionType;
