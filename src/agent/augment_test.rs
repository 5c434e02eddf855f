use super::*;
use crate::state::test_helpers::MockLlm;
use serde_json::json;

#[derive(Debug, serde::Deserialize)]
struct Doc {
    value: u32,
}

fn accept(_: &Doc) -> Result<(), String> {
    Ok(())
}

#[tokio::test]
async fn missing_client_is_not_configured() {
    let result = try_augment::<Doc, _>(None, "sys", &json!({}), accept).await;
    assert!(matches!(result, Err(RejectReason::NotConfigured)));
}

#[tokio::test]
async fn valid_output_passes_through() {
    let llm: Arc<dyn LlmComplete> = MockLlm::always(r#"{"value":3}"#);
    let doc = try_augment::<Doc, _>(Some(&llm), "sys", &json!({}), accept)
        .await
        .expect("valid output");
    assert_eq!(doc.value, 3);
}

#[tokio::test]
async fn non_json_output_is_a_parse_rejection() {
    let llm: Arc<dyn LlmComplete> = MockLlm::always("sure, here you go!");
    let result = try_augment::<Doc, _>(Some(&llm), "sys", &json!({}), accept).await;
    assert!(matches!(result, Err(RejectReason::Parse(_))));
}

#[tokio::test]
async fn wrong_schema_is_a_parse_rejection() {
    let llm: Arc<dyn LlmComplete> = MockLlm::always(r#"{"value":"three"}"#);
    let result = try_augment::<Doc, _>(Some(&llm), "sys", &json!({}), accept).await;
    assert!(matches!(result, Err(RejectReason::Parse(_))));
}

#[tokio::test]
async fn failed_check_is_a_schema_rejection() {
    let llm: Arc<dyn LlmComplete> = MockLlm::always(r#"{"value":3}"#);
    let result = try_augment::<Doc, _>(Some(&llm), "sys", &json!({}), |_| Err("value not allowed".into())).await;
    assert!(matches!(result, Err(RejectReason::Schema(_))));
}

#[tokio::test]
async fn transport_failure_is_an_api_rejection() {
    let llm: Arc<dyn LlmComplete> =
        Arc::new(MockLlm::new(vec![Err(LlmError::ApiRequest("connection refused".into()))]));
    let result = try_augment::<Doc, _>(Some(&llm), "sys", &json!({}), accept).await;
    assert!(matches!(result, Err(RejectReason::Api(_))));
}

#[test]
fn truncated_bounds_the_slice() {
    let items = [1, 2, 3];
    assert_eq!(truncated(&items, 2), &[1, 2]);
    assert_eq!(truncated(&items, 3), &[1, 2, 3]);
    assert_eq!(truncated(&items, 10), &[1, 2, 3]);
    assert_eq!(truncated::<i32>(&[], 5), &[] as &[i32]);
}
