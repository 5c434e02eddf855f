use super::*;
use crate::llm::LlmComplete;
use crate::state::test_helpers::{MockLlm, test_app_state, test_app_state_with_llm};
use axum::body::to_bytes;
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;

async fn call(state: AppState, body: Value) -> Response {
    layout(State(state), Ok(Json(body))).await
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn request_body() -> Value {
    json!({
        "message": "space them evenly in a row",
        "viewport": { "x": 0.0, "y": 0.0, "w": 1200.0, "h": 800.0 },
        "shapes": [
            { "id": "a", "type": "geo", "bounds": { "x": 100.0, "y": 100.0, "w": 100.0, "h": 50.0 } },
            { "id": "b", "type": "geo", "bounds": { "x": 360.0, "y": 100.0, "w": 120.0, "h": 50.0 } },
            { "id": "c", "type": "geo", "bounds": { "x": 700.0, "y": 100.0, "w": 80.0, "h": 50.0 } },
        ],
    })
}

#[tokio::test]
async fn zero_gap_hint_is_a_generic_400() {
    let mut body = request_body();
    body["hints"] = json!({ "gapPx": 0 });
    let response = call(test_app_state(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn heuristic_distributes_with_even_gaps() {
    let response = call(test_app_state(), request_body()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let value = body_json(response).await;
    let moves = value["moves"].as_array().expect("moves");
    let xs: Vec<f64> = moves.iter().map(|m| m["to"]["x"].as_f64().expect("x")).collect();
    assert_eq!(xs, vec![100.0, 390.0, 700.0]);
}

#[tokio::test]
async fn valid_model_moves_are_used() {
    let llm: Arc<dyn LlmComplete> =
        MockLlm::always(r#"{"moves":[{"id":"a","to":{"x":0.0,"y":0.0}},{"id":"b","to":{"x":150.0,"y":0.0}}]}"#);
    let response = call(test_app_state_with_llm(llm), request_body()).await;

    let value = body_json(response).await;
    assert_eq!(value["moves"].as_array().expect("moves").len(), 2);
    assert_eq!(value["moves"][1]["to"]["x"], json!(150.0));
}

#[tokio::test]
async fn model_moves_with_unknown_ids_fall_back() {
    let llm: Arc<dyn LlmComplete> = MockLlm::always(r#"{"moves":[{"id":"ghost","to":{"x":0.0,"y":0.0}}]}"#);
    let response = call(test_app_state_with_llm(llm), request_body()).await;

    let value = body_json(response).await;
    let moves = value["moves"].as_array().expect("moves");
    assert_eq!(moves.len(), 3);
    assert_eq!(moves[0]["id"], json!("a"));
}
