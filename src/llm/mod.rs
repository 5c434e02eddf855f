//! LLM — multi-provider adapter for the augmentation layer.
//!
//! DESIGN
//! ======
//! Configured entirely from environment variables; a missing credential is
//! not an error at this level — main logs a warning and the service runs on
//! heuristics alone. The `LlmClient` enum dispatches to OpenAI or Anthropic
//! based on `LLM_PROVIDER`. Only one operation is exposed: a single-turn,
//! temperature-zero completion expected to yield one JSON object.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmComplete;
use types::LlmError;

/// Concrete LLM client that dispatches to either OpenAI or Anthropic.
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
}

enum LlmProvider {
    OpenAi(openai::OpenAiClient),
    Anthropic(anthropic::AnthropicClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables. See
    /// [`LlmConfig::from_env`] for the variable set.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let inner = match config.provider {
            LlmProviderKind::OpenAi => {
                LlmProvider::OpenAi(openai::OpenAiClient::new(config.api_key, config.timeouts)?)
            }
            LlmProviderKind::Anthropic => {
                LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.timeouts)?)
            }
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name (e.g. `"gpt-5-mini"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmComplete for LlmClient {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        match &self.inner {
            LlmProvider::OpenAi(c) => c.complete_json(&self.model, system, user).await,
            LlmProvider::Anthropic(c) => c.complete_json(&self.model, system, user).await,
        }
    }
}
