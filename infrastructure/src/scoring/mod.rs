//! The resilient remote scoring pipeline.
//!
//! [`RemoteEssayScorer`] implements the application's `EssayScorer` port on
//! top of a vendor-specific [`providers::ScoringProvider`] and a pluggable
//! [`transport::ChatTransport`], with bounded concurrency, retry with capped
//! exponential backoff, and a consecutive-failure circuit breaker.

pub mod breaker;
pub mod config;
pub mod gateway;
pub mod providers;
pub mod transport;

pub use config::ScoringConfig;
pub use gateway::RemoteEssayScorer;
