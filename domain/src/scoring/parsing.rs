//! Score payload parsing.
//!
//! Scoring models are asked to return a bare JSON object, but in practice
//! they wrap it in markdown fences or surround it with commentary. These
//! functions recover the `{score, reason, confidence}` payload from that
//! free-form output. They are pure domain logic: no I/O, no retry policy,
//! just text handling.

use serde_json::Value;

/// A score payload recovered from model output.
///
/// `score` is already clamped to the request's maximum; `confidence` to
/// `[0, 1]`. The reason is raw model text; callers sanitize it when
/// building a [`ScoringResult`](crate::scoring::result::ScoringResult).
#[derive(Debug, Clone, PartialEq)]
pub struct ScorePayload {
    pub score: u32,
    pub reason: String,
    pub confidence: f64,
}

/// Parse a scoring payload out of free-form model output.
///
/// Missing fields fall back to `score = 0`, `reason = "No reason provided"`,
/// `confidence = 0.0`. Returns `None` when no JSON object can be recovered
/// at all; the caller treats that the same as a transport failure.
pub fn parse_score_payload(raw: &str, max_score: u32) -> Option<ScorePayload> {
    let value: Value = serde_json::from_str(extract_json_object(raw)).ok()?;
    let object = value.as_object()?;

    let score = object
        .get("score")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let score = (score as i64).clamp(0, max_score as i64) as u32;

    let reason = object
        .get("reason")
        .and_then(|v| v.as_str())
        .unwrap_or("No reason provided")
        .to_string();

    let confidence = object
        .get("confidence")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let confidence = if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };

    Some(ScorePayload {
        score,
        reason,
        confidence,
    })
}

/// Extract the JSON object from free-form model output.
///
/// Strips an optional surrounding markdown code fence, then takes the
/// substring between the first `{` and the last `}` so leading or trailing
/// commentary is tolerated.
pub fn extract_json_object(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    if let Some(stripped) = cleaned.strip_prefix("```") {
        cleaned = stripped.strip_prefix("json").unwrap_or(stripped);
        cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned);
        cleaned = cleaned.trim();
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && end > start
    {
        return &cleaned[start..=end];
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== extract_json_object ====================

    #[test]
    fn test_extract_plain_object() {
        assert_eq!(extract_json_object(r#"{"score": 5}"#), r#"{"score": 5}"#);
    }

    #[test]
    fn test_extract_strips_code_fence() {
        let raw = "```json\n{\"score\": 5}\n```";
        assert_eq!(extract_json_object(raw), r#"{"score": 5}"#);
    }

    #[test]
    fn test_extract_strips_bare_fence() {
        let raw = "```\n{\"score\": 5}\n```";
        assert_eq!(extract_json_object(raw), r#"{"score": 5}"#);
    }

    #[test]
    fn test_extract_tolerates_commentary() {
        let raw = "Here is my evaluation:\n{\"score\": 5}\nHope that helps!";
        assert_eq!(extract_json_object(raw), r#"{"score": 5}"#);
    }

    #[test]
    fn test_extract_without_object_returns_input() {
        assert_eq!(extract_json_object("no json here"), "no json here");
    }

    // ==================== parse_score_payload ====================

    #[test]
    fn test_parse_full_payload() {
        let payload = parse_score_payload(
            r#"{"score": 15, "reason": "Thoughtful answer", "confidence": 0.85}"#,
            20,
        )
        .unwrap();
        assert_eq!(payload.score, 15);
        assert_eq!(payload.reason, "Thoughtful answer");
        assert_eq!(payload.confidence, 0.85);
    }

    #[test]
    fn test_parse_fenced_payload() {
        let raw = "```json\n{\"score\": 8, \"reason\": \"ok\", \"confidence\": 0.5}\n```";
        assert_eq!(parse_score_payload(raw, 10).unwrap().score, 8);
    }

    #[test]
    fn test_parse_defaults_for_missing_fields() {
        let payload = parse_score_payload("{}", 10).unwrap();
        assert_eq!(payload.score, 0);
        assert_eq!(payload.reason, "No reason provided");
        assert_eq!(payload.confidence, 0.0);
    }

    #[test]
    fn test_parse_clamps_score_to_max() {
        assert_eq!(parse_score_payload(r#"{"score": 99}"#, 20).unwrap().score, 20);
        assert_eq!(parse_score_payload(r#"{"score": -5}"#, 20).unwrap().score, 0);
    }

    #[test]
    fn test_parse_truncates_fractional_score() {
        assert_eq!(parse_score_payload(r#"{"score": 7.9}"#, 20).unwrap().score, 7);
    }

    #[test]
    fn test_parse_clamps_confidence() {
        let payload = parse_score_payload(r#"{"confidence": 2.5}"#, 20).unwrap();
        assert_eq!(payload.confidence, 1.0);
        let payload = parse_score_payload(r#"{"confidence": -1}"#, 20).unwrap();
        assert_eq!(payload.confidence, 0.0);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse_score_payload("not json at all", 20).is_none());
        assert!(parse_score_payload("{broken", 20).is_none());
        assert!(parse_score_payload(r#"[1, 2, 3]"#, 20).is_none());
        assert!(parse_score_payload("", 20).is_none());
    }
}
