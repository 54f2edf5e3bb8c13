//! Evaluation audit trail.

pub mod jsonl;

pub use jsonl::JsonlAuditLog;
