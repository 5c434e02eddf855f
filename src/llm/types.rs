//! Provider-neutral LLM types and errors.

use serde::{Deserialize, Serialize};

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// A single chat message sent to a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Provider-neutral async trait for single-turn JSON completions.
/// Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmComplete: Send + Sync {
    /// Ask the model for one JSON object answering `user` under the `system`
    /// contract. Sampling temperature is zero for determinism.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response envelope
    /// is malformed. The returned text is NOT guaranteed to be valid JSON —
    /// the augmentation layer owns that check.
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError>;
}
