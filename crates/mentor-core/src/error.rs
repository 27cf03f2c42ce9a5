//! Parse errors for the closed vocabularies.

use thiserror::Error;

/// Error parsing one of the closed string sets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The language code is not one of the supported languages.
    #[error("unknown language code: {0:?}")]
    UnknownLanguage(String),

    /// The question type is not one of the supported variants.
    #[error("unknown question type: {0:?}")]
    UnknownQuestionType(String),
}
