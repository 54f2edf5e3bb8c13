//! Remote scoring value objects and payload parsing.

pub mod parsing;
pub mod request;
pub mod result;

pub use parsing::{ScorePayload, extract_json_object, parse_score_payload};
pub use request::ScoringRequest;
pub use result::ScoringResult;
