//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown question type: {0}")]
    UnknownQuestionType(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}
