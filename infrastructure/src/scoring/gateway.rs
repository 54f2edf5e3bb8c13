//! The resilient remote scoring gateway.
//!
//! [`RemoteEssayScorer`] wraps one provider endpoint with the full
//! admission-and-retry pipeline, executed in order and short-circuiting:
//!
//! 1. readiness gate: incomplete config defers immediately
//! 2. circuit-breaker gate: an open circuit defers immediately
//! 3. concurrency admission: a slot must be acquired within a bounded wait
//! 4. attempt loop: `retry + 1` attempts with capped exponential backoff
//!
//! Every failure path resolves to a `manual_review` result with a reason;
//! `score` never returns an error and never panics.

use super::breaker::CircuitBreaker;
use super::config::ScoringConfig;
use super::providers::{ContentError, ScoringProvider};
use super::transport::{ChatTransport, HttpChatTransport, TransportError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use warden_application::EssayScorer;
use warden_domain::{ScoringRequest, ScoringResult, parse_score_payload, truncate, util::request_id};

/// One attempt's failure. Every kind retries the same way; the distinction
/// exists only for logs.
#[derive(Debug, Error)]
enum AttemptError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("scoring payload not parsable")]
    MalformedPayload,
}

/// Remote essay scorer with bounded concurrency, retry with capped
/// exponential backoff, and a consecutive-failure circuit breaker.
///
/// The semaphore and breaker are the only mutable state and are shared by
/// every call through this instance; everything else is immutable after
/// construction. Create one instance per provider configuration at startup
/// and share it.
pub struct RemoteEssayScorer {
    config: ScoringConfig,
    provider: Box<dyn ScoringProvider>,
    transport: Arc<dyn ChatTransport>,
    permits: Arc<Semaphore>,
    breaker: CircuitBreaker,
    shutdown: CancellationToken,
}

impl RemoteEssayScorer {
    /// Create a scorer backed by the production HTTP transport.
    pub fn new(config: ScoringConfig, provider: Box<dyn ScoringProvider>) -> Self {
        Self::with_transport(config, provider, Arc::new(HttpChatTransport::new()))
    }

    /// Create a scorer over an explicit transport (tests, instrumentation).
    pub fn with_transport(
        config: ScoringConfig,
        provider: Box<dyn ScoringProvider>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        let config = config.clamped();
        let permits = Arc::new(Semaphore::new(config.max_concurrency));
        let breaker = CircuitBreaker::new(
            "remote-scoring",
            config.breaker_failure_threshold,
            Duration::from_millis(config.breaker_open_ms),
        );
        Self {
            config,
            provider,
            transport,
            permits,
            breaker,
            shutdown: CancellationToken::new(),
        }
    }

    /// Tie backoff sleeps to a shutdown token. A cancelled call aborts its
    /// current wait and returns a manual-review result.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    async fn attempt(&self, request: &ScoringRequest) -> Result<ScoringResult, AttemptError> {
        let url = self.provider.endpoint_url(&self.config.api_base);
        let headers = self.provider.request_headers(&self.config);
        let payload = self.provider.build_payload(request, &self.config);

        let response = self
            .transport
            .post_json(
                &url,
                &headers,
                &payload,
                Duration::from_millis(self.config.timeout_ms),
            )
            .await?;

        if !response.is_success() {
            return Err(AttemptError::Status {
                status: response.status,
                body: truncate(&response.body, 200),
            });
        }

        let content = self.provider.extract_content(&response.body)?;
        let payload = parse_score_payload(&content, request.max_score())
            .ok_or(AttemptError::MalformedPayload)?;

        Ok(ScoringResult::scored(
            payload.score,
            &payload.reason,
            payload.confidence,
            request.max_score(),
        ))
    }

    fn manual(
        &self,
        request_id: &str,
        retry_count: u32,
        started: Instant,
        reason: &str,
    ) -> ScoringResult {
        ScoringResult::manual_review(reason).with_provenance(
            self.provider.name(),
            &self.config.model,
            request_id,
            started.elapsed().as_millis() as u64,
            retry_count,
        )
    }
}

#[async_trait]
impl EssayScorer for RemoteEssayScorer {
    async fn score(&self, request: &ScoringRequest) -> ScoringResult {
        let request_id = request_id();
        let started = Instant::now();

        if !self.config.is_ready() {
            warn!(
                request_id = %request_id,
                question_id = request.question_id(),
                "scoring config incomplete, deferring to manual review"
            );
            return self.manual(
                &request_id,
                0,
                started,
                "Scoring configuration incomplete, requires manual review",
            );
        }

        if self.breaker.is_open().await {
            warn!(
                request_id = %request_id,
                question_id = request.question_id(),
                "circuit breaker open, deferring to manual review"
            );
            return self.manual(
                &request_id,
                0,
                started,
                "Scoring circuit breaker open, requires manual review",
            );
        }

        // Owned permit: released on every exit path, including cancellation,
        // when it drops.
        let acquire = Arc::clone(&self.permits).acquire_owned();
        let _permit = match timeout(
            Duration::from_millis(self.config.acquire_timeout_ms),
            acquire,
        )
        .await
        {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) | Err(_) => {
                warn!(
                    request_id = %request_id,
                    question_id = request.question_id(),
                    "scoring queue saturated, deferring to manual review"
                );
                return self.manual(
                    &request_id,
                    0,
                    started,
                    "Scoring queue saturated, requires manual review",
                );
            }
        };

        let attempts = self.config.retry.saturating_add(1);
        for attempt in 1..=attempts {
            match self.attempt(request).await {
                Ok(result) => {
                    self.breaker.record_success().await;
                    debug!(
                        request_id = %request_id,
                        question_id = request.question_id(),
                        attempt,
                        score = result.score,
                        "remote scoring succeeded"
                    );
                    return result.with_provenance(
                        self.provider.name(),
                        &self.config.model,
                        &request_id,
                        started.elapsed().as_millis() as u64,
                        attempt - 1,
                    );
                }
                Err(e) => {
                    warn!(
                        request_id = %request_id,
                        question_id = request.question_id(),
                        attempt,
                        error = %e,
                        "scoring attempt failed"
                    );
                    let failures = self.breaker.record_failure().await;
                    if failures == self.config.breaker_failure_threshold {
                        warn!(
                            request_id = %request_id,
                            failures,
                            "circuit breaker tripped for remote scoring"
                        );
                    }

                    if attempt == attempts {
                        return self.manual(
                            &request_id,
                            attempt - 1,
                            started,
                            "Scoring unavailable after retries, requires manual review",
                        );
                    }

                    let delay = backoff_delay(
                        attempt,
                        self.config.retry_backoff_base_ms,
                        self.config.retry_backoff_max_ms,
                    );
                    tokio::select! {
                        _ = self.shutdown.cancelled() => {
                            warn!(request_id = %request_id, "scoring cancelled during backoff");
                            return self.manual(
                                &request_id,
                                attempt - 1,
                                started,
                                "Scoring cancelled, requires manual review",
                            );
                        }
                        _ = sleep(delay) => {}
                    }
                }
            }
        }

        self.manual(
            &request_id,
            attempts - 1,
            started,
            "Scoring unavailable after retries, requires manual review",
        )
    }
}

/// Exponential backoff with a ceiling. `attempt` is 1-indexed.
fn backoff_delay(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    let exponent = attempt.saturating_sub(1).min(20);
    let delay = base_ms.saturating_mul(1 << exponent).min(max_ms);
    Duration::from_millis(delay)
}
