//! Evaluation records: per-question audit details and the submission result.

use super::definition::QuestionType;
use crate::scoring::result::ScoringResult;
use crate::util::timestamp_ms;
use serde::{Deserialize, Serialize};

/// Provider tag used for deterministic, in-process scoring.
pub const LOCAL_PROVIDER: &str = "local";

/// The audit record for one evaluated answer.
///
/// Created once per answer and never mutated. The serialized field set
/// (`question_id, type, score, max_score, reason, confidence, manual_review,
/// provider, model, request_id, latency_ms, retry_count`) is the durable
/// contract the admin UI and reviewer summaries read: extend it, do not
/// rename it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionScoreDetail {
    pub question_id: u32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub score: u32,
    pub max_score: u32,
    pub reason: String,
    pub confidence: f64,
    pub manual_review: bool,
    pub provider: String,
    pub model: String,
    pub request_id: String,
    pub latency_ms: u64,
    pub retry_count: u32,
}

impl QuestionScoreDetail {
    /// A deterministic, locally computed detail (choice questions, missing
    /// answers). Full confidence, never deferred.
    pub fn local(
        question_id: u32,
        question_type: QuestionType,
        score: u32,
        max_score: u32,
        reason: &str,
    ) -> Self {
        Self {
            question_id,
            question_type,
            score: score.min(max_score),
            max_score,
            reason: reason.to_string(),
            confidence: 1.0,
            manual_review: false,
            provider: LOCAL_PROVIDER.to_string(),
            model: String::new(),
            request_id: String::new(),
            latency_ms: 0,
            retry_count: 0,
        }
    }

    /// Wrap a remote scoring result verbatim.
    pub fn from_remote(
        question_id: u32,
        question_type: QuestionType,
        max_score: u32,
        result: ScoringResult,
    ) -> Self {
        Self {
            question_id,
            question_type,
            score: result.score.min(max_score),
            max_score,
            reason: result.reason,
            confidence: result.confidence,
            manual_review: result.manual_review,
            provider: result.provider,
            model: result.model,
            request_id: result.request_id,
            latency_ms: result.latency_ms,
            retry_count: result.retry_count,
        }
    }
}

/// The outcome of evaluating one questionnaire submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireResult {
    pub passed: bool,
    pub score: u32,
    pub pass_score: u32,
    /// True when any detail requires a human decision. The admission flow
    /// must treat such a submission as pending review even when the numeric
    /// score clears the pass threshold.
    pub manual_review_required: bool,
    pub details: Vec<QuestionScoreDetail>,
    /// Timestamp of the evaluation (milliseconds since epoch)
    pub evaluated_at: u64,
}

impl QuestionnaireResult {
    /// Aggregate per-question details into a submission result.
    pub fn new(pass_score: u32, details: Vec<QuestionScoreDetail>) -> Self {
        let score = details.iter().fold(0u32, |acc, d| acc.saturating_add(d.score));
        Self {
            passed: score >= pass_score,
            score,
            pass_score,
            manual_review_required: details.iter().any(|d| d.manual_review),
            details,
            evaluated_at: timestamp_ms(),
        }
    }

    /// The result of a disabled questionnaire: every applicant passes with
    /// a full score and nothing to review.
    pub fn pass_through(pass_score: u32) -> Self {
        Self {
            passed: true,
            score: 100,
            pass_score,
            manual_review_required: false,
            details: Vec::new(),
            evaluated_at: timestamp_ms(),
        }
    }

    /// Whether this result qualifies for automatic approval under the given
    /// policy flag.
    pub fn auto_approvable(&self, auto_approve_on_pass: bool) -> bool {
        auto_approve_on_pass && self.passed && !self.manual_review_required
    }
}
