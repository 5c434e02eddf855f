//! OpenAI chat-completions client in JSON-object mode.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::config::LlmTimeouts;
use super::types::{LlmError, Message};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
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
        Ok(Self { http, api_key, base_url: DEFAULT_BASE_URL.to_string() })
    }

    /// Request one JSON-object completion at temperature zero.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] for transport failures, non-200 statuses, or
    /// a response envelope without message content.
    pub async fn complete_json(&self, model: &str, system: &str, user: &str) -> Result<String, LlmError> {
        let body = CcRequest {
            model,
            temperature: 0.0,
            response_format: ResponseFormat { format_type: "json_object" },
            messages: vec![
                Message { role: "system".into(), content: system.into() },
                Message { role: "user".into(), content: user.into() },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
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
struct CcRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Extract `choices[0].message.content` from the response envelope.
fn parse_content(text: &str) -> Result<String, LlmError> {
    let value: Value = serde_json::from_str(text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LlmError::ApiParse("missing choices[0].message.content".into()))
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
