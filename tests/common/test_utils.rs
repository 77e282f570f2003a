use super::mocks::{MockClusterReader, MockLlmClient};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use kube_query::{
    agent::Agent,
    config::{ClusterConfig, Config, LlmConfig, LogsConfig, ServerConfig},
    server::{self, AppState},
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

pub const TEST_NAMESPACE: &str = "default";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            logs: LogsConfig {
                level: "debug".to_string(),
                file: "logs/test.log".to_string(),
            },
        },
        llm: LlmConfig {
            base_url: String::new(),
            api_key: "test-api-key".to_string(),
            model: "gpt-4o".to_string(),
        },
        cluster: ClusterConfig {
            namespace: TEST_NAMESPACE.to_string(),
            log_tail_lines: 50,
        },
    }
}

pub fn create_test_agent(cluster: &MockClusterReader, llm: &MockLlmClient) -> Agent {
    Agent::new(
        Box::new(cluster.clone()),
        Box::new(llm.clone()),
        TEST_NAMESPACE,
    )
}

/// Router wired to the given mocks; the mocks keep observing every call.
pub fn create_test_app(cluster: &MockClusterReader, llm: &MockLlmClient) -> Router {
    server::router(AppState::new(create_test_agent(cluster, llm)))
}

pub fn json_request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Sends a request and returns the status with the decoded JSON body
/// (`Value::Null` when the body is not JSON).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn send_query(app: Router, body: Value) -> (StatusCode, Value) {
    send(app, json_request("POST", "/query", body.to_string())).await
}
