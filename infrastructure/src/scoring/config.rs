//! Validated runtime configuration for the scoring gateway.

/// Runtime configuration of one scoring provider instance.
///
/// Construction sites call [`ScoringConfig::clamped`] so every knob is
/// already inside its valid range by the time the gateway reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Provider variant name (`openai`, `anthropic`, ...).
    pub provider: String,
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    /// Per-request timeout. Floor: 1000 ms.
    pub timeout_ms: u64,
    /// Extra attempts after the first.
    pub retry: u32,
    pub system_prompt: String,
    /// Output-format hint forwarded to the model.
    pub score_format: String,
    /// Process-wide cap on in-flight scoring calls. Floor: 1.
    pub max_concurrency: usize,
    /// Bounded wait for a concurrency slot. Floor: 100 ms.
    pub acquire_timeout_ms: u64,
    /// First backoff delay. Floor: 100 ms.
    pub retry_backoff_base_ms: u64,
    /// Backoff ceiling. Floor: the base delay.
    pub retry_backoff_max_ms: u64,
    /// Consecutive failures before the circuit opens. Floor: 1.
    pub breaker_failure_threshold: u32,
    /// How long the circuit stays open. Floor: 1000 ms.
    pub breaker_open_ms: u64,
    /// Cap on each prompt field built from untrusted text. Floor: 200.
    pub input_max_length: usize,
}

impl ScoringConfig {
    /// Apply the documented floors to every knob.
    pub fn clamped(mut self) -> Self {
        self.provider = self.provider.trim().to_string();
        self.api_base = self.api_base.trim().to_string();
        self.api_key = self.api_key.trim().to_string();
        self.model = self.model.trim().to_string();
        self.timeout_ms = self.timeout_ms.max(1000);
        self.max_concurrency = self.max_concurrency.max(1);
        self.acquire_timeout_ms = self.acquire_timeout_ms.max(100);
        self.retry_backoff_base_ms = self.retry_backoff_base_ms.max(100);
        self.retry_backoff_max_ms = self.retry_backoff_max_ms.max(self.retry_backoff_base_ms);
        self.breaker_failure_threshold = self.breaker_failure_threshold.max(1);
        self.breaker_open_ms = self.breaker_open_ms.max(1000);
        self.input_max_length = self.input_max_length.max(200);
        self
    }

    /// Whether the config is complete enough to call the remote model.
    ///
    /// Checked on every call, not cached, so a hot-reloaded config takes
    /// effect immediately.
    pub fn is_ready(&self) -> bool {
        !self.api_base.trim().is_empty()
            && !self.api_key.trim().is_empty()
            && !self.model.trim().is_empty()
    }
}
