//! Scoring request value object

use crate::core::sanitize::sanitize;

/// Maximum characters carried by any free-text field of a scoring request.
const FIELD_CAP: usize = 2000;

/// An immutable request to grade one free-text answer.
///
/// Text fields are sanitized and length-capped at construction, so a request
/// that exists is always safe to embed in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRequest {
    question_id: u32,
    question: String,
    answer: String,
    scoring_rule: String,
    max_score: u32,
}

impl ScoringRequest {
    pub fn new(
        question_id: u32,
        question: &str,
        answer: &str,
        scoring_rule: &str,
        max_score: u32,
    ) -> Self {
        Self {
            question_id,
            question: sanitize(question, FIELD_CAP),
            answer: sanitize(answer, FIELD_CAP),
            scoring_rule: sanitize(scoring_rule, FIELD_CAP),
            max_score,
        }
    }

    pub fn question_id(&self) -> u32 {
        self.question_id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn scoring_rule(&self) -> &str {
        &self.scoring_rule
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }
}
