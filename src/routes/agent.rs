//! Orchestrated multi-step endpoint — `POST /api/canvas-agent`.
//!
//! DESIGN
//! ======
//! Resolves the request into a plan (heuristic baseline, optionally replaced
//! by a validated model plan) and frames it as an ordered SSE stream:
//! `message`? → `tool.<name>`* → `done`. The producer task writes into a
//! bounded channel; if the consumer disconnects the sends fail and
//! production stops. `done` terminates the stream even on internal failure.
//! Non-streaming callers pass `?stream=false` and receive the plan as one
//! JSON document.

use std::collections::HashSet;
use std::convert::Infallible;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::sse::Sse;
use axum::response::{IntoResponse, Json, Response};
use futures::{FutureExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use crate::agent::augment::{self, RejectReason};
use crate::agent::events::AgentEvent;
use crate::agent::heuristics::{self, Plan};
use crate::agent::tools::{self, Step};
use crate::schema::AgentRequest;
use crate::state::AppState;

/// Shape/selection list bound for the model payload.
const MAX_AGENT_SHAPES: usize = 200;

const AGENT_SYSTEM: &str = "You are a canvas layout and drawing assistant controlling a 2D page-based editor.\n\
    You will receive: message, viewportSize {w,h}, visibleCenter {x,y}, shapes[], selectionIds[].\n\
    All coordinates are in page space. Use visibleCenter when the user requests centering.\n\
    Respond ONLY with strict JSON: { steps: [{ tool, args }], say? }.\n\
    Tools: addShape, updateShape, moveShapes, resizeShape, rotateShape, layoutDistribute, deleteShapes.\n\
    For addShape, prefer type 'geo' with geo in {rectangle, ellipse, triangle, diamond}.\n\
    When the user specifies a color, include a 'color' property using one of {black, grey, red, orange, yellow, green, teal, blue, indigo, violet, pink, white}.\n\
    You may also change an existing shape's color using updateShape with props.color when requested.\n\
    Clamp sizes (w,h) to viewportSize min 8px; do not clamp positions.";

#[derive(Debug, Deserialize)]
pub struct StreamOpts {
    stream: Option<bool>,
}

/// `POST /api/canvas-agent` — streamed (default) or single-document plan.
pub async fn canvas_agent(
    State(state): State<AppState>,
    Query(opts): Query<StreamOpts>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let request: AgentRequest = match super::decode(body) {
        Ok(r) => r,
        Err(response) => return response,
    };

    info!(
        shapes = request.shapes.len(),
        selection = request.selection_ids.len(),
        "agent: request received"
    );

    if !opts.stream.unwrap_or(true) {
        let plan = resolve_plan(&state, &request).await;
        let steps = validate_plan(&plan, &request);
        return Json(Plan { steps, say: plan.say }).into_response();
    }

    let (tx, rx) = mpsc::channel::<AgentEvent>(32);
    tokio::spawn(produce(state, request, tx));

    let stream = ReceiverStream::new(rx).map(|event| Ok::<_, Infallible>(event.into_sse()));
    Sse::new(stream).into_response()
}

/// Heuristic plan first, then one model attempt against the same schema.
async fn resolve_plan(state: &AppState, req: &AgentRequest) -> Plan {
    let fallback = heuristics::build_plan(req);

    let user = json!({
        "message": req.message,
        "viewportSize": req.viewport_size,
        "visibleCenter": req.visible_center,
        "shapes": augment::truncated(&req.shapes, MAX_AGENT_SHAPES),
        "selectionIds": augment::truncated(&req.selection_ids, MAX_AGENT_SHAPES),
    });

    match augment::try_augment::<Plan, _>(state.llm.as_ref(), AGENT_SYSTEM, &user, |_| Ok(())).await {
        Ok(plan) => {
            info!(steps = plan.steps.len(), "agent: using model plan");
            plan
        }
        Err(RejectReason::NotConfigured) => fallback,
        Err(reason) => {
            warn!(%reason, "agent: model plan rejected — using heuristic plan");
            fallback
        }
    }
}

/// Run every step through the validator, dropping failures silently.
fn validate_plan(plan: &Plan, req: &AgentRequest) -> Vec<Step> {
    let mut known: HashSet<String> = req.shapes.iter().map(|s| s.id.clone()).collect();
    let mut out = Vec::new();
    for step in &plan.steps {
        match tools::validate_step(step, req.viewport_size, &mut known) {
            Ok(validated) => match validated.args_value() {
                Ok(args) => out.push(Step::new(validated.tool(), args)),
                Err(e) => debug!(error = %e, "agent: step payload dropped"),
            },
            Err(e) => debug!(tool = step.tool.as_str(), error = %e, "agent: step dropped"),
        }
    }
    out
}

/// Producer task. Sends the plan events in order, then always `done`.
async fn produce(state: AppState, req: AgentRequest, tx: mpsc::Sender<AgentEvent>) {
    let emitted = std::panic::AssertUnwindSafe(emit_plan(&state, &req, &tx))
        .catch_unwind()
        .await;
    if emitted.is_err() {
        warn!("agent: stream failed mid-flight");
        let _ = tx.send(AgentEvent::message("(error) Agent failed to process.")).await;
    }
    // The stream must terminate with done even after a failure.
    let _ = tx.send(AgentEvent::Done).await;
}

async fn emit_plan(state: &AppState, req: &AgentRequest, tx: &mpsc::Sender<AgentEvent>) {
    let plan = resolve_plan(state, req).await;

    if let Some(say) = &plan.say {
        if tx.send(AgentEvent::message(say.clone())).await.is_err() {
            return;
        }
    }

    for step in validate_plan(&plan, req) {
        let event = AgentEvent::Tool { name: step.tool, payload: step.args };
        if tx.send(event).await.is_err() {
            // Consumer disconnected; stop producing.
            return;
        }
    }
}

#[cfg(test)]
#[path = "agent_test.rs"]
mod tests;
