//! Layout distribution endpoint — `POST /api/canvas-agent/layout`.
//!
//! Answers a list of absolute moves distributing the targeted shapes along a
//! row or column. The heuristic distribution is the baseline; a configured
//! model may replace it only when every move names an id from the snapshot.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::{info, warn};

use crate::agent::augment::{self, RejectReason};
use crate::agent::heuristics;
use crate::schema::{LayoutRequest, LayoutResponse};
use crate::state::AppState;

/// Shape list bound for the model payload.
const MAX_LAYOUT_SHAPES: usize = 200;

const LAYOUT_SYSTEM: &str = "You are a canvas layout assistant.\n\
    You will receive: message, viewport {x,y,w,h}, hints {axis,align,gapPx,target}, shapes[], selectionIds[].\n\
    Distribute the shapes along the requested axis with even or explicit gaps.\n\
    Respond ONLY with strict JSON: { moves: [{ id, to: {x,y} }] }.\n\
    Every id MUST come from shapes[]. Use integer coordinates.";

/// `POST /api/canvas-agent/layout`
pub async fn layout(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let request: LayoutRequest = match super::decode(body) {
        Ok(r) => r,
        Err(response) => return response,
    };

    let fallback = heuristics::layout_heuristic(&request);

    let user = json!({
        "message": request.message,
        "viewport": request.viewport,
        "hints": request.hints,
        "shapes": augment::truncated(&request.shapes, MAX_LAYOUT_SHAPES),
        "selectionIds": request.selection_ids,
    });

    let check = |resp: &LayoutResponse| {
        for m in &resp.moves {
            if !request.shapes.iter().any(|s| s.id == m.id) {
                return Err(format!("move id {} not in snapshot", m.id));
            }
        }
        Ok(())
    };

    let response =
        match augment::try_augment::<LayoutResponse, _>(state.llm.as_ref(), LAYOUT_SYSTEM, &user, check).await {
            Ok(resp) => {
                info!(moves = resp.moves.len(), "layout: using model response");
                resp
            }
            Err(RejectReason::NotConfigured) => fallback,
            Err(reason) => {
                warn!(%reason, "layout: model response rejected — using heuristic");
                fallback
            }
        };

    Json(response).into_response()
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
