//! Domain layer for gatewarden
//!
//! This crate contains the core business logic, entities, and value objects
//! of the registration gatekeeper. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Scoring
//!
//! Free-text questionnaire answers are graded by a remote scoring model. The
//! domain layer owns the request/result value objects, the sanitization
//! applied on every trust boundary, and the tolerant parsing of the model's
//! JSON score payload. The resilience pipeline around the remote call lives
//! in the infrastructure layer.
//!
//! ## Questionnaire
//!
//! A bilingual questionnaire definition (choice and text questions) plus the
//! per-question audit details produced when a submission is evaluated.
//! Choice questions are scored deterministically; text questions defer to
//! the remote scorer.

pub mod core;
pub mod questionnaire;
pub mod scoring;
pub mod util;

// Re-export commonly used types
pub use self::core::{
    error::DomainError,
    sanitize::{sanitize, truncate},
};
pub use questionnaire::{
    answer::Answer,
    definition::{
        Language, Question, QuestionOption, QuestionType, QuestionnaireDefinition, TextInputSpec,
    },
    result::{QuestionScoreDetail, QuestionnaireResult},
    scoring::score_choice_answer,
};
pub use scoring::{
    parsing::{ScorePayload, extract_json_object, parse_score_payload},
    request::ScoringRequest,
    result::ScoringResult,
};
