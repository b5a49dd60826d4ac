use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router as AxumRouter};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::workflow::{Capability, Coordinator, WorkflowError};

/// Shared handler state: the coordinator behind an async mutex, since
/// agents mutate their conversation history per query.
pub struct AppState<C> {
    coordinator: Arc<Mutex<Coordinator<C>>>,
}

impl<C> AppState<C> {
    pub fn new(coordinator: Coordinator<C>) -> Self {
        Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
        }
    }
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

pub type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

pub fn build_router<C>(state: AppState<C>) -> AxumRouter
where
    C: Capability + Send + 'static,
{
    AxumRouter::new()
        .route("/a2a", post(a2a::<C>))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn a2a<C>(
    State(state): State<AppState<C>>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError>
where
    C: Capability + Send + 'static,
{
    let mut coordinator = state.coordinator.lock().await;
    match coordinator.answer(&payload.query).await {
        Ok(response) => Ok(Json(AnswerResponse { response })),
        Err(WorkflowError::DeadlineExceeded) => {
            error!("query exceeded workflow deadline");
            Err(api_error(
                StatusCode::GATEWAY_TIMEOUT,
                "workflow deadline exceeded",
            ))
        }
        Err(e) => {
            error!(error = %e, "workflow failed");
            Err(api_error(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

/// Bind and serve until ctrl-c.
pub async fn serve<C>(state: AppState<C>, addr: SocketAddr) -> Result<(), std::io::Error>
where
    C: Capability + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use super::*;
    use crate::agent::AgentError;
    use crate::workflow::Router;

    struct Canned {
        reply: Option<&'static str>,
    }

    #[async_trait]
    impl Capability for Canned {
        async fn invoke(&mut self, _prompt: &str) -> Result<String, AgentError> {
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Err(AgentError::Runtime("backend unreachable".into())),
            }
        }
    }

    fn app(reply: Option<&'static str>) -> AxumRouter {
        let coordinator = Coordinator::new(
            Router::default(),
            Canned { reply },
            Canned { reply },
            Canned { reply },
        );
        build_router(AppState::new(coordinator))
    }

    fn post_query(query: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/a2a")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "query": query }).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn a2a_returns_synthesized_response() {
        let response = app(Some("the answer"))
            .oneshot(post_query("Explain what you can do."))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["response"], "the answer");
    }

    #[tokio::test]
    async fn a2a_maps_workflow_failure_to_bad_gateway() {
        let response = app(None)
            .oneshot(post_query("latest news on AAPL"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert!(parsed["error"].as_str().unwrap().contains("web agent"));
    }

    #[tokio::test]
    async fn health_reports_crate_metadata() {
        let response = app(Some("unused"))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["name"], "troupe");
    }
}
