//! Augmentation layer — optional model override with strict fallback.
//!
//! DESIGN
//! ======
//! The heuristic result is computed first as the baseline; the model is
//! asked to do better against the same schema. Every rejection reason —
//! missing credential, transport failure, non-JSON output, schema violation
//! — collapses to the same fallback path through one combinator. There is no
//! retry and no per-field salvage: fallback is immediate and total.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::llm::LlmComplete;
use crate::llm::types::LlmError;

/// Why a model response was discarded. Logged, never surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RejectReason {
    #[error("no model configured")]
    NotConfigured,
    #[error("model call failed: {0}")]
    Api(#[from] LlmError),
    #[error("model output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model output failed validation: {0}")]
    Schema(String),
}

/// Ask the configured model for a `T` conforming to the endpoint schema.
///
/// `check` enforces the semantic constraints serde cannot (e.g. every named
/// shape id exists in the snapshot).
///
/// # Errors
///
/// Returns the [`RejectReason`] the caller should log before falling back to
/// its precomputed heuristic result.
pub async fn try_augment<T, F>(
    llm: Option<&Arc<dyn LlmComplete>>,
    system: &str,
    user: &serde_json::Value,
    check: F,
) -> Result<T, RejectReason>
where
    T: DeserializeOwned,
    F: FnOnce(&T) -> Result<(), String>,
{
    let llm = llm.ok_or(RejectReason::NotConfigured)?;
    let text = llm.complete_json(system, &user.to_string()).await?;
    let parsed: T = serde_json::from_str(&text)?;
    check(&parsed).map_err(RejectReason::Schema)?;
    Ok(parsed)
}

/// Bound the shape payload sent to the model.
#[must_use]
pub fn truncated<T>(items: &[T], max: usize) -> &[T] {
    &items[..items.len().min(max)]
}

#[cfg(test)]
#[path = "augment_test.rs"]
mod tests;
