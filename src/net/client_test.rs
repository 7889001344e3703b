use super::*;
use crate::config::Timeouts;
use crate::net::graphql::{AUTHORS, ME};

fn config() -> ConsoleConfig {
    ConsoleConfig::new("http://127.0.0.1:9/graphql".into(), Timeouts { request_secs: 1, connect_secs: 1 }).unwrap()
}

#[test]
fn cache_key_includes_operation_and_variables() {
    let a = cache_key(&AUTHORS, &serde_json::json!({}));
    let b = cache_key(&AUTHORS, &serde_json::json!({ "id": "1" }));
    assert_eq!(a, "Authors:{}");
    assert_ne!(a, b);
    assert_ne!(a, cache_key(&ME, &serde_json::json!({})));
}

#[test]
fn new_client_starts_with_empty_cache() {
    let client = GraphqlClient::new(&config()).unwrap();
    assert_eq!(client.endpoint(), "http://127.0.0.1:9/graphql");
    assert_eq!(client.cached_entries(), 0);
}

#[tokio::test]
async fn unreachable_endpoint_is_request_error() {
    let client = GraphqlClient::new(&config()).unwrap();
    let err = client.execute(&ME, serde_json::json!({}), FetchPolicy::NetworkOnly).await.unwrap_err();
    assert!(matches!(err, NetError::Request(_) | NetError::Timeout));
    assert_eq!(client.cached_entries(), 0);
}
