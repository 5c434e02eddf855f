use super::*;
use crate::llm::LlmComplete;
use crate::state::test_helpers::{MockLlm, test_app_state, test_app_state_with_llm};
use axum::body::to_bytes;
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;

async fn call(state: AppState, body: Value) -> Response {
    create_shape(State(state), Ok(Json(body))).await
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn request_body(message: &str, shape_hint: Option<&str>) -> Value {
    let mut body = json!({
        "message": message,
        "viewport": { "x": 0.0, "y": 0.0, "w": 1200.0, "h": 800.0 },
    });
    if let Some(hint) = shape_hint {
        body["shapeHint"] = json!(hint);
    }
    body
}

#[tokio::test]
async fn empty_message_is_a_generic_400() {
    let response = call(test_app_state(), request_body("", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn default_placement_is_viewport_centered() {
    let response = call(test_app_state(), request_body("add a box", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let value = body_json(response).await;
    assert_eq!(value, json!({ "x": 500.0, "y": 340.0, "w": 200.0, "h": 120.0 }));
}

#[tokio::test]
async fn circle_hint_gets_a_square_footprint() {
    let response = call(test_app_state(), request_body("add a circle", Some("circle"))).await;
    let value = body_json(response).await;
    assert_eq!(value, json!({ "x": 520.0, "y": 320.0, "w": 160.0, "h": 160.0 }));
}

#[tokio::test]
async fn model_placement_is_clamped_into_the_viewport() {
    let llm: Arc<dyn LlmComplete> = MockLlm::always(r#"{"x":-50.0,"y":9999.0,"w":5000.0,"h":10.0}"#);
    let response = call(test_app_state_with_llm(llm), request_body("add a box", None)).await;

    let value = body_json(response).await;
    assert_eq!(value, json!({ "x": 0.0, "y": 776.0, "w": 1200.0, "h": 24.0 }));
}

#[tokio::test]
async fn non_json_model_output_falls_back_to_the_default() {
    let llm: Arc<dyn LlmComplete> = MockLlm::always("put it wherever");
    let response = call(test_app_state_with_llm(llm), request_body("add a box", None)).await;

    let value = body_json(response).await;
    assert_eq!(value, json!({ "x": 500.0, "y": 340.0, "w": 200.0, "h": 120.0 }));
}
