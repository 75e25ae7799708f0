// ABOUTME: HTTP trigger receiver for deployment notifications.
// ABOUTME: POST /webhook runs the pipeline; /health answers OK unconditionally.

mod error;

pub use error::TriggerError;

use crate::deploy::Pipeline;
use crate::error::{Error, Result};
use crate::types::{DeploymentRequest, ImageRef};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{any, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub const SUCCESS_MESSAGE: &str = "Deployment updated";

/// Body returned when the workload was updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentResponse {
    pub status: String,
    pub message: String,
    pub image: String,
}

impl DeploymentResponse {
    pub fn success(image: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: SUCCESS_MESSAGE.to_string(),
            image: image.into(),
        }
    }
}

/// Build the receiver's routes around a shared pipeline.
///
/// Methods other than POST on `/webhook` get `405` from the router itself.
pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/webhook", post(handle_trigger))
        .route("/health", any(health))
        .with_state(pipeline)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

async fn handle_trigger(
    State(pipeline): State<Arc<Pipeline>>,
    body: Bytes,
) -> std::result::Result<Json<DeploymentResponse>, TriggerError> {
    let request = DeploymentRequest::from_json(&body)?;

    tracing::info!(
        image = %request.image,
        tag = %request.tag,
        git_ref = %request.git_ref,
        commit = %request.commit,
        "Received deployment request"
    );

    let image = ImageRef::parse(&request.image).inspect_err(|e| {
        tracing::warn!(image = %request.image, error = %e, "Rejected deployment request");
    })?;

    match pipeline.update(&image).await {
        Ok(deployed) => {
            tracing::info!(
                image = %deployed.image,
                local_image = %deployed.local_image,
                warnings = deployed.warnings.len(),
                "Deployment updated successfully"
            );
            Ok(Json(DeploymentResponse::success(request.image)))
        }
        Err(e) => {
            tracing::error!(
                image = %image,
                stage = e.stage().as_str(),
                error = %e,
                "Error updating deployment"
            );
            Err(e.into())
        }
    }
}

/// Listen on `0.0.0.0:<port>` until Ctrl-C.
pub async fn serve(pipeline: Pipeline) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], pipeline.config().port));
    let listener = TcpListener::bind(addr).await.map_err(|source| Error::Bind {
        addr: addr.to_string(),
        source,
    })?;

    tracing::info!(%addr, cluster = %pipeline.config().cluster_name, "Webhook server listening");

    axum::serve(listener, router(Arc::new(pipeline)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
