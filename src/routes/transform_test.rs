use super::*;
use crate::llm::LlmComplete;
use crate::state::test_helpers::{MockLlm, test_app_state, test_app_state_with_llm};
use axum::body::to_bytes;
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;

async fn call(state: AppState, body: Value) -> Response {
    transform(State(state), Ok(Json(body))).await
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn request_body(message: &str) -> Value {
    json!({
        "message": message,
        "viewport": { "x": 0.0, "y": 0.0, "w": 1200.0, "h": 800.0 },
        "shapes": [
            { "id": "a", "type": "geo", "geo": "ellipse", "color": "red",
              "bounds": { "x": 0.0, "y": 0.0, "w": 100.0, "h": 100.0 } },
            { "id": "b", "type": "geo", "geo": "rectangle", "color": "blue",
              "bounds": { "x": 200.0, "y": 0.0, "w": 100.0, "h": 100.0 } },
        ],
    })
}

#[tokio::test]
async fn empty_shape_list_is_a_generic_400() {
    let mut body = request_body("move it");
    body["shapes"] = json!([]);
    let response = call(test_app_state(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn heuristic_moves_the_hinted_shape_to_center() {
    let response = call(test_app_state(), request_body("move the blue rectangle to the center")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let value = body_json(response).await;
    assert_eq!(value["action"], json!("move"));
    assert_eq!(value["shapeId"], json!("b"));
    assert_eq!(value["move"]["to"], json!({ "x": 600.0, "y": 400.0 }));
}

#[tokio::test]
async fn valid_model_response_is_used() {
    let llm: Arc<dyn LlmComplete> =
        MockLlm::always(r#"{"action":"rotate","shapeId":"b","rotate":{"by":90.0,"unit":"deg"}}"#);
    let response = call(test_app_state_with_llm(llm), request_body("turn the blue one")).await;

    let value = body_json(response).await;
    assert_eq!(value["action"], json!("rotate"));
    assert_eq!(value["shapeId"], json!("b"));
    assert_eq!(value["rotate"]["by"], json!(90.0));
}

#[tokio::test]
async fn model_response_naming_an_unknown_shape_falls_back() {
    let llm: Arc<dyn LlmComplete> =
        MockLlm::always(r#"{"action":"rotate","shapeId":"ghost","rotate":{"by":90.0}}"#);
    let response = call(test_app_state_with_llm(llm), request_body("move the blue rectangle")).await;

    let value = body_json(response).await;
    assert_eq!(value["action"], json!("move"));
    assert_eq!(value["shapeId"], json!("b"));
}
