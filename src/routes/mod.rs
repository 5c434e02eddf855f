//! Router assembly and shared request decoding.
//!
//! SYSTEM CONTEXT
//! ==============
//! Four endpoints over the same pipeline: the orchestrated multi-step agent
//! (streamed), and three narrow synchronous endpoints for placement,
//! transform, and layout. Every malformed request body collapses to the
//! same generic 400 with no partial processing.

pub mod agent;
pub mod layout;
pub mod shape;
pub mod transform;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::de::DeserializeOwned;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::schema::Validate;
use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/canvas-agent", post(agent::canvas_agent))
        .route("/api/canvas-agent/layout", post(layout::layout))
        .route("/api/shape-llm", post(shape::create_shape))
        .route("/api/shape-llm/transform", post(transform::transform))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// The one 400 every malformed request maps to. Deliberately generic.
pub(crate) fn invalid_request() -> Response {
    (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": "Invalid request" }))).into_response()
}

/// Decode and validate a request body. Any structural or semantic failure
/// yields the generic 400 response.
pub(crate) fn decode<T>(body: Result<Json<serde_json::Value>, JsonRejection>) -> Result<T, Response>
where
    T: DeserializeOwned + Validate,
{
    let Ok(Json(value)) = body else {
        return Err(invalid_request());
    };
    let request: T = serde_json::from_value(value).map_err(|_| invalid_request())?;
    request.validate().map_err(|_| invalid_request())?;
    Ok(request)
}
