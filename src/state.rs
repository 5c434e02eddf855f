//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! The pipeline is stateless per request — the only shared resource is the
//! optional LLM client, so there is nothing to lock.

use std::sync::Arc;

use crate::llm::LlmComplete;

/// Shared application state. Clone is required by Axum.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` if LLM env vars are not configured,
    /// which silently selects the heuristic-only path.
    pub llm: Option<Arc<dyn LlmComplete>>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmComplete>>) -> Self {
        Self { llm }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::llm::types::LlmError;
    use std::sync::Mutex;

    /// Create a heuristic-only test `AppState`.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(None)
    }

    /// Create a test `AppState` backed by a canned-response mock model.
    #[must_use]
    pub fn test_app_state_with_llm(llm: Arc<dyn LlmComplete>) -> AppState {
        AppState::new(Some(llm))
    }

    /// Mock model returning queued responses in order, then an error.
    pub struct MockLlm {
        responses: Mutex<Vec<Result<String, LlmError>>>,
    }

    impl MockLlm {
        #[must_use]
        pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self { responses: Mutex::new(responses) }
        }

        /// Mock that returns the same text for the next few calls.
        #[must_use]
        pub fn always(text: &str) -> Arc<Self> {
            Arc::new(Self::new((0..8).map(|_| Ok(text.to_string())).collect()))
        }
    }

    #[async_trait::async_trait]
    impl LlmComplete for MockLlm {
        async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Err(LlmError::ApiRequest("mock exhausted".into()))
            } else {
                responses.remove(0)
            }
        }
    }
}
