//! Infrastructure layer for gatewarden - External adapters and implementations
//!
//! Everything that touches the outside world lives here: the resilient
//! remote scoring gateway and its provider variants, the HTTP transport,
//! configuration loading, the questionnaire store, and the JSONL audit log.

pub mod audit;
pub mod config;
pub mod questionnaire;
pub mod scoring;

pub use audit::JsonlAuditLog;
pub use config::{ConfigLoader, FileConfig, FileQuestionnaireConfig, FileScoringConfig};
pub use questionnaire::{QuestionnaireStore, StoreError};
pub use scoring::{
    RemoteEssayScorer, ScoringConfig,
    breaker::CircuitBreaker,
    providers::{AnthropicProvider, OpenAiCompatibleProvider, ScoringProvider, provider_for},
    transport::{ChatTransport, HttpChatTransport, TransportError, TransportResponse},
};
