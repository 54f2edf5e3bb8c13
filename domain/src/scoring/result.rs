//! Scoring result value object

use crate::core::sanitize::sanitize;
use serde::{Deserialize, Serialize};

/// Maximum characters kept of a model-supplied reason.
pub const REASON_CAP: usize = 500;

/// The outcome of grading one answer, remote or degraded.
///
/// A `manual_review` result means automation deferred to a human; it always
/// carries `score = 0`, `confidence = 0.0` and a reason saying why.
///
/// The serialized shape of this type (together with
/// [`QuestionScoreDetail`](crate::questionnaire::result::QuestionScoreDetail))
/// is the durable contract the admin UI and reviewer summaries read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: u32,
    pub reason: String,
    pub confidence: f64,
    pub manual_review: bool,
    pub provider: String,
    pub model: String,
    pub request_id: String,
    pub latency_ms: u64,
    pub retry_count: u32,
}

impl ScoringResult {
    /// A successfully graded answer. Score and confidence are clamped into
    /// their valid ranges; the reason is sanitized and capped.
    pub fn scored(score: u32, reason: &str, confidence: f64, max_score: u32) -> Self {
        Self {
            score: score.min(max_score),
            reason: sanitize(reason, REASON_CAP),
            confidence: clamp_confidence(confidence),
            manual_review: false,
            provider: String::new(),
            model: String::new(),
            request_id: String::new(),
            latency_ms: 0,
            retry_count: 0,
        }
    }

    /// A deferred answer: automation could not grade it and a human must.
    pub fn manual_review(reason: &str) -> Self {
        Self {
            score: 0,
            reason: sanitize(reason, REASON_CAP),
            confidence: 0.0,
            manual_review: true,
            provider: String::new(),
            model: String::new(),
            request_id: String::new(),
            latency_ms: 0,
            retry_count: 0,
        }
    }

    /// Attach call provenance: which provider and model produced this result,
    /// under which request id, and how expensive the call was.
    pub fn with_provenance(
        mut self,
        provider: &str,
        model: &str,
        request_id: &str,
        latency_ms: u64,
        retry_count: u32,
    ) -> Self {
        self.provider = provider.to_string();
        self.model = model.to_string();
        self.request_id = request_id.to_string();
        self.latency_ms = latency_ms;
        self.retry_count = retry_count;
        self
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
