//! Anthropic messages-API provider.

use super::{ContentError, ScoringProvider, user_prompt};
use crate::scoring::config::ScoringConfig;
use serde_json::{Value, json};
use warden_domain::ScoringRequest;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Upper bound on the reply; score payloads are small.
const MAX_OUTPUT_TOKENS: u32 = 1024;

pub struct AnthropicProvider;

impl ScoringProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn endpoint_url(&self, api_base: &str) -> String {
        let base = api_base.trim().trim_end_matches('/');
        if base.ends_with("/v1/messages") {
            base.to_string()
        } else {
            format!("{base}/v1/messages")
        }
    }

    fn request_headers(&self, config: &ScoringConfig) -> Vec<(String, String)> {
        vec![
            ("x-api-key".to_string(), config.api_key.clone()),
            ("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string()),
        ]
    }

    fn build_payload(&self, request: &ScoringRequest, config: &ScoringConfig) -> Value {
        json!({
            "model": config.model,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "temperature": 0,
            "system": config.system_prompt,
            "messages": [
                { "role": "user", "content": user_prompt(request, config) },
            ],
        })
    }

    fn extract_content(&self, body: &str) -> Result<String, ContentError> {
        let envelope: Value =
            serde_json::from_str(body).map_err(|e| ContentError::InvalidJson(e.to_string()))?;
        let content = envelope["content"][0]["text"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();
        if content.is_empty() {
            return Err(ContentError::MissingContent);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        ScoringConfig {
            provider: "anthropic".to_string(),
            api_base: "https://api.anthropic.com".to_string(),
            api_key: "sk-ant-test".to_string(),
            model: "claude-test".to_string(),
            timeout_ms: 15_000,
            retry: 2,
            system_prompt: "You are a strict grader.".to_string(),
            score_format: "JSON".to_string(),
            max_concurrency: 4,
            acquire_timeout_ms: 2000,
            retry_backoff_base_ms: 500,
            retry_backoff_max_ms: 8000,
            breaker_failure_threshold: 5,
            breaker_open_ms: 30_000,
            input_max_length: 2000,
        }
    }

    #[test]
    fn test_endpoint_url_appends_messages_path() {
        let provider = AnthropicProvider;
        assert_eq!(
            provider.endpoint_url("https://api.anthropic.com"),
            "https://api.anthropic.com/v1/messages"
        );
        assert_eq!(
            provider.endpoint_url("https://api.anthropic.com/v1/messages/"),
            "https://api.anthropic.com/v1/messages"
        );
    }

    #[test]
    fn test_headers_use_api_key_not_bearer() {
        let headers = AnthropicProvider.request_headers(&config());
        assert!(headers.contains(&("x-api-key".to_string(), "sk-ant-test".to_string())));
        assert!(headers.contains(&("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string())));
    }

    #[test]
    fn test_payload_puts_system_prompt_top_level() {
        let request = ScoringRequest::new(1, "Why join?", "answer", "", 20);
        let payload = AnthropicProvider.build_payload(&request, &config());
        assert_eq!(payload["system"], "You are a strict grader.");
        assert_eq!(payload["temperature"], 0);
        assert_eq!(payload["messages"][0]["role"], "user");
        assert!(payload["messages"].as_array().unwrap().len() == 1);
    }

    #[test]
    fn test_extract_content_from_content_blocks() {
        let body = r#"{"content": [{"type": "text", "text": "{\"score\": 3}"}]}"#;
        assert_eq!(
            AnthropicProvider.extract_content(body).unwrap(),
            r#"{"score": 3}"#
        );
    }

    #[test]
    fn test_extract_rejects_empty_content() {
        assert!(matches!(
            AnthropicProvider.extract_content(r#"{"content": []}"#),
            Err(ContentError::MissingContent)
        ));
    }
}
