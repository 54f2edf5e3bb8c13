//! OpenAI-compatible chat-completions provider.
//!
//! The default variant: it also serves the many vendors that expose the
//! same wire shape (DeepSeek, OpenRouter, local gateways).

use super::{ContentError, ScoringProvider, user_prompt};
use crate::scoring::config::ScoringConfig;
use serde_json::{Value, json};
use warden_domain::ScoringRequest;

pub struct OpenAiCompatibleProvider;

impl ScoringProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn endpoint_url(&self, api_base: &str) -> String {
        let base = api_base.trim().trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{base}/chat/completions")
        }
    }

    fn request_headers(&self, config: &ScoringConfig) -> Vec<(String, String)> {
        vec![("Authorization".to_string(), format!("Bearer {}", config.api_key))]
    }

    fn build_payload(&self, request: &ScoringRequest, config: &ScoringConfig) -> Value {
        json!({
            "model": config.model,
            "temperature": 0,
            "messages": [
                { "role": "system", "content": config.system_prompt },
                { "role": "user", "content": user_prompt(request, config) },
            ],
        })
    }

    fn extract_content(&self, body: &str) -> Result<String, ContentError> {
        let envelope: Value =
            serde_json::from_str(body).map_err(|e| ContentError::InvalidJson(e.to_string()))?;
        let content = envelope["choices"][0]["message"]["content"]
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
