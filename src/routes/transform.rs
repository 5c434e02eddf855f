//! Single-shape transform endpoint — `POST /api/shape-llm/transform`.
//!
//! Picks one shape from the snapshot and answers with exactly one action
//! (move, resize, or rotate). The heuristic result is computed first; a
//! configured model may replace it, but only with a response that names a
//! shape id actually present in the snapshot.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::{info, warn};

use crate::agent::augment::{self, RejectReason};
use crate::agent::heuristics;
use crate::schema::{TransformRequest, TransformResponse};
use crate::state::AppState;

/// Shape list bound for the model payload.
const MAX_TRANSFORM_SHAPES: usize = 150;

const TRANSFORM_SYSTEM: &str = "You are a canvas transform assistant.\n\
    You will receive: message, viewport {x,y,w,h}, hints, shapes[].\n\
    Pick exactly one shape from shapes[] and exactly one action.\n\
    Respond ONLY with strict JSON: { action: 'move'|'resize'|'rotate', shapeId, move?: {to?,by?}, resize?: {to?,by?}, rotate?: {to?,by?,unit?} }.\n\
    shapeId MUST be an id from shapes[]. Angles default to degrees.\n\
    Keep sizes at least 8px and no larger than the viewport.";

/// `POST /api/shape-llm/transform`
pub async fn transform(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let request: TransformRequest = match super::decode(body) {
        Ok(r) => r,
        Err(response) => return response,
    };

    let fallback = heuristics::transform_heuristic(&request);

    let user = json!({
        "message": request.message,
        "viewport": request.viewport,
        "hints": request.hints,
        "shapes": augment::truncated(&request.shapes, MAX_TRANSFORM_SHAPES),
    });

    let check = |resp: &TransformResponse| {
        if request.shapes.iter().any(|s| s.id == resp.shape_id) {
            Ok(())
        } else {
            Err(format!("shapeId {} not in snapshot", resp.shape_id))
        }
    };

    let response =
        match augment::try_augment::<TransformResponse, _>(state.llm.as_ref(), TRANSFORM_SYSTEM, &user, check).await {
            Ok(resp) => {
                info!(action = ?resp.action, shape = %resp.shape_id, "transform: using model response");
                resp
            }
            Err(RejectReason::NotConfigured) => fallback,
            Err(reason) => {
                warn!(%reason, "transform: model response rejected — using heuristic");
                fallback
            }
        };

    Json(response).into_response()
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
