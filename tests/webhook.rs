// ABOUTME: Integration tests for the HTTP trigger receiver.
// ABOUTME: Drives the router in-process and checks statuses, bodies, and tool calls.

mod support;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use deploy_hook::config::Config;
use deploy_hook::deploy::Pipeline;
use deploy_hook::server::{DeploymentResponse, router};
use http_body_util::BodyExt;
use std::sync::Arc;
use support::{FakeRunner, init_tracing, write_marker};
use tempfile::TempDir;
use tower::ServiceExt;

fn app(runner: &Arc<FakeRunner>, dir: &TempDir) -> Router {
    init_tracing();
    let pipeline = Pipeline::new(Config::default(), runner.clone()).with_search_dir(dir.path());
    router(Arc::new(pipeline))
}

fn webhook(method: Method, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn successful_trigger_echoes_image() {
    let dir = TempDir::new().unwrap();
    write_marker(dir.path());
    let runner = Arc::new(FakeRunner::new());

    let response = app(&runner, &dir)
        .oneshot(webhook(
            Method::POST,
            r#"{"image":"ghcr.io/u/hello-go:abc","tag":"abc","ref":"refs/heads/main","commit":"abc"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::to_value(DeploymentResponse::success("ghcr.io/u/hello-go:abc")).unwrap()
    );
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Deployment updated");
    assert_eq!(runner.call_count(), 5);
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let dir = TempDir::new().unwrap();
    write_marker(dir.path());
    let runner = Arc::new(FakeRunner::new());

    let response = app(&runner, &dir)
        .oneshot(webhook(Method::POST, "image=nginx"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("invalid JSON"));
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn array_body_is_bad_request() {
    let dir = TempDir::new().unwrap();
    write_marker(dir.path());
    let runner = Arc::new(FakeRunner::new());

    let response = app(&runner, &dir)
        .oneshot(webhook(Method::POST, r#"["ghcr.io/u/hello-go:abc"]"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("invalid JSON"));
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn empty_image_is_rejected_before_pipeline() {
    let dir = TempDir::new().unwrap();
    write_marker(dir.path());
    let runner = Arc::new(FakeRunner::new());

    let response = app(&runner, &dir)
        .oneshot(webhook(Method::POST, r#"{"tag":"abc"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn get_webhook_is_method_not_allowed() {
    let dir = TempDir::new().unwrap();
    let runner = Arc::new(FakeRunner::new());

    let response = app(&runner, &dir)
        .oneshot(webhook(Method::GET, ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn pipeline_failure_is_server_error() {
    let dir = TempDir::new().unwrap();
    write_marker(dir.path());
    let runner = Arc::new(FakeRunner::new().fail("docker pull", 1, "pull access denied"));

    let response = app(&runner, &dir)
        .oneshot(webhook(Method::POST, r#"{"image":"ghcr.io/u/private:v1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["stage"], "pull");
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("deployment failed: image pull failed"));
    assert!(message.contains("pull access denied"));
    assert_eq!(runner.call_count(), 1);
}

#[tokio::test]
async fn missing_project_root_is_server_error() {
    let dir = TempDir::new().unwrap();
    let runner = Arc::new(FakeRunner::new());
    let config = Config {
        marker: "deploy-hook-missing/marker.yaml".into(),
        ..Config::default()
    };
    let pipeline = Pipeline::new(config, runner.clone()).with_search_dir(dir.path());

    let response = router(Arc::new(pipeline))
        .oneshot(webhook(Method::POST, r#"{"image":"nginx"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["stage"], "project-root");
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn health_is_ok_for_any_method() {
    // No marker on disk: health must not depend on the pipeline
    let dir = TempDir::new().unwrap();
    let runner = Arc::new(FakeRunner::new());

    for method in [Method::GET, Method::POST, Method::HEAD] {
        let response = app(&runner, &dir)
            .oneshot(
                Request::builder()
                    .method(method.clone())
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{method}");
        if method != Method::HEAD {
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&bytes[..], b"OK");
        }
    }
    assert_eq!(runner.call_count(), 0);
}
