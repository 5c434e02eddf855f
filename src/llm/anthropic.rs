//! Anthropic messages API client.
//!
//! The messages API has no native JSON response mode; the system contract
//! already demands a bare JSON object, and the augmentation layer rejects
//! anything that fails to parse.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::config::LlmTimeouts;
use super::types::{LlmError, Message};

const BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url: BASE_URL.to_string() })
    }

    /// Request one completion at temperature zero.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] for transport failures, non-200 statuses, or
    /// a response envelope without a text block.
    pub async fn complete_json(&self, model: &str, system: &str, user: &str) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model,
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
            system,
            messages: vec![Message { role: "user".into(), content: user.into() }],
        };

        let url = format!("{}/messages", self.base_url);
        let response = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_content(&text)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message>,
}

/// Extract `content[0].text` from the response envelope.
fn parse_content(text: &str) -> Result<String, LlmError> {
    let value: Value = serde_json::from_str(text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    value
        .pointer("/content/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LlmError::ApiParse("missing content[0].text".into()))
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
