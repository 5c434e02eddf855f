//! Shape placement endpoint — `POST /api/shape-llm`.
//!
//! Answers a single placement rectangle for a new shape. The default is
//! viewport-centered with a fixed footprint; a configured model may propose
//! a different placement, which is clamped into the viewport with a 24px
//! minimum before it is returned.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::{info, warn};

use crate::agent::augment::{self, RejectReason};
use crate::agent::heuristics;
use crate::schema::{CreateRequest, Placement};
use crate::state::AppState;

const CREATE_SYSTEM: &str = "You are a canvas placement assistant.\n\
    You will receive: message, viewport {x,y,w,h}, shapeHint.\n\
    Propose where to place one new shape inside the viewport.\n\
    Respond ONLY with strict JSON: { x, y, w, h } in page coordinates.";

/// `POST /api/shape-llm`
pub async fn create_shape(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let request: CreateRequest = match super::decode(body) {
        Ok(r) => r,
        Err(response) => return response,
    };

    let fallback = heuristics::create_placement(request.viewport, request.shape_hint.as_deref());

    let user = json!({
        "message": request.message,
        "viewport": request.viewport,
        "shapeHint": request.shape_hint,
    });

    let check = |p: &Placement| {
        if p.x.is_finite() && p.y.is_finite() && p.w.is_finite() && p.h.is_finite() {
            Ok(())
        } else {
            Err("non-finite placement".to_string())
        }
    };

    let placement =
        match augment::try_augment::<Placement, _>(state.llm.as_ref(), CREATE_SYSTEM, &user, check).await {
            Ok(p) => {
                let clamped = heuristics::clamp_placement(request.viewport, p);
                info!(x = clamped.x, y = clamped.y, w = clamped.w, h = clamped.h, "shape: using model placement");
                clamped
            }
            Err(RejectReason::NotConfigured) => fallback,
            Err(reason) => {
                warn!(%reason, "shape: model placement rejected — using default");
                fallback
            }
        };

    Json(placement).into_response()
}

#[cfg(test)]
#[path = "shape_test.rs"]
mod tests;
