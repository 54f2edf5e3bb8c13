//! Essay scorer port
//!
//! Defines the interface for grading free-text answers.

use async_trait::async_trait;
use warden_domain::{ScoringRequest, ScoringResult};

/// Port for grading one free-text answer.
///
/// Implementations (adapters) live in the infrastructure layer. The port is
/// infallible: an implementation that cannot produce a grade (unreachable
/// model, exhausted retries, saturated queue) returns a `manual_review`
/// result instead of an error, and a submission is never blocked on scoring
/// availability.
#[async_trait]
pub trait EssayScorer: Send + Sync {
    /// Grade one answer. Never fails; degraded outcomes arrive as
    /// `manual_review` results with a reason.
    async fn score(&self, request: &ScoringRequest) -> ScoringResult;
}
