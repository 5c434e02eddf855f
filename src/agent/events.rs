//! Event framing for the streamed execution protocol.
//!
//! A request produces zero or one `message` event, zero or more `tool.<name>`
//! events in production order, and exactly one terminal `done` — even on
//! internal failure. The client applies events in order: a later move may
//! target a shape created by an earlier addShape in the same stream.

use axum::response::sse::Event;
use serde_json::json;

use super::tools::ToolName;

/// One frame of the agent stream.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// Advisory natural-language note (e.g. "no intent detected").
    Message { text: String },
    /// One validated tool step.
    Tool { name: ToolName, payload: serde_json::Value },
    /// Terminal marker. Always closes the stream.
    Done,
}

impl AgentEvent {
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    /// SSE event name: `message`, `tool.<name>`, or `done`.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Message { .. } => "message".to_string(),
            Self::Tool { name, .. } => format!("tool.{}", name.as_str()),
            Self::Done => "done".to_string(),
        }
    }

    /// Convert into the wire frame. `done` carries no data payload.
    #[must_use]
    pub fn into_sse(self) -> Event {
        let name = self.name();
        match self {
            Self::Message { text } => Event::default().event(name).data(json!({ "text": text }).to_string()),
            Self::Tool { payload, .. } => Event::default().event(name).data(payload.to_string()),
            Self::Done => Event::default().event(name),
        }
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
