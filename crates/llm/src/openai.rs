//! OpenAI Provider
//!
//! Implementation of the StructureProvider trait for OpenAI's chat-completion
//! API. The completion message content is expected to be a JSON-shaped outline
//! (optionally wrapped in a markdown code fence).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::provider::{missing_api_key_error, parse_http_error, StructureProvider};
use super::types::{
    PresentationStructure, ProviderConfig, ProviderError, ProviderResult,
};
use crate::http_client::build_http_client;

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Models-listing endpoint used by the connectivity probe
const OPENAI_MODELS_URL: &str = "https://api.openai.com/v1/models";

/// System prompt instructing the model to emit a parsable outline
const STRUCTURE_SYSTEM_PROMPT: &str = "You are a presentation designer. \
Respond with a single JSON object and nothing else, shaped as \
{\"title\": string, \"slides\": [{\"heading\": string, \"points\": [string]}], \
\"summary\": string, \"estimated_duration\": string}.";

/// OpenAI provider
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(Duration::from_secs(config.timeout_secs));
        Self { config, client }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// Build the request body for the API
    fn build_request_body(&self, content: &str, guidance: &str) -> serde_json::Value {
        let user_prompt = if guidance.trim().is_empty() {
            format!("Structure the following content into a presentation:\n\n{}", content)
        } else {
            format!(
                "Structure the following content into a presentation.\nGuidance: {}\n\n{}",
                guidance.trim(),
                content
            )
        };

        serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": STRUCTURE_SYSTEM_PROMPT },
                { "role": "user", "content": user_prompt },
            ],
        })
    }

    /// Parse the completion message content into a structure.
    ///
    /// Best-effort: a leading/trailing markdown code fence is stripped first,
    /// and anything that still fails to deserialize is a parse failure.
    fn parse_structure(&self, raw: &str) -> ProviderResult<PresentationStructure> {
        let body = strip_code_fences(raw);
        serde_json::from_str(body).map_err(|e| ProviderError::ParseError {
            message: format!("Failed to parse presentation structure: {}", e),
        })
    }
}

/// Strip a surrounding markdown code fence (``` or ```json) from a payload.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.rsplit_once("```") {
        Some((body, _)) => body.trim(),
        None => rest.trim(),
    }
}

#[async_trait]
impl StructureProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn fetch_structure(
        &self,
        content: &str,
        guidance: &str,
    ) -> ProviderResult<PresentationStructure> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("openai"))?;

        let body = self.build_request_body(content, guidance);
        debug!(model = %self.config.model, "requesting presentation structure");

        let response = self
            .client
            .post(self.base_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                message: e.to_string(),
            })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "openai"));
        }

        let chat_response: ChatResponse =
            serde_json::from_str(&body_text).map_err(|e| ProviderError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let message_content = chat_response
            .choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .ok_or_else(|| ProviderError::ParseError {
                message: "Response contained no message content".to_string(),
            })?;

        self.parse_structure(message_content)
    }

    async fn list_models(&self) -> ProviderResult<Vec<String>> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("openai"))?;

        let response = self
            .client
            .get(OPENAI_MODELS_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status, &body, "openai"));
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| ProviderError::ParseError {
                message: e.to_string(),
            })?;

        let models = body["data"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|m| m["id"].as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
