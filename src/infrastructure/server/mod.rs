//! Webhook HTTP server
//!
//! Axum router exposing the group-message callback and a health probe,
//! served with graceful shutdown.
//!
//! # Endpoints
//!
//! - `POST /message/{token}` - GroupMe callback; `token` is the bot id used for replies
//! - `GET /health` - Store connectivity

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::application::errors::BotError;
use crate::application::services::MessageService;
use crate::domain::entities::InboundMessage;

/// Shared per-process state handed to every request
#[derive(Clone)]
pub struct AppState {
    service: Arc<MessageService>,
}

impl AppState {
    pub fn new(service: MessageService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Build the router with all routes
pub fn router(state: AppState, log_requests: bool) -> Router {
    let router = Router::new()
        .route("/message/{token}", post(receive_message))
        .route("/health", get(health))
        .with_state(state);

    if log_requests {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Serve until Ctrl+C or SIGTERM
pub async fn serve(address: &str, state: AppState, log_requests: bool) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening for callbacks on {}", address);

    axum::serve(listener, router(state, log_requests))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Handle one group-message callback
pub async fn receive_message(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> (StatusCode, String) {
    let message: InboundMessage = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            let err = BotError::MalformedPayload(e.to_string());
            warn!("Rejecting callback: {}", err);
            return (StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    info!("Handling message for group {}", message.group_id);

    match state.service.process(&token, message).await {
        Ok(_) => (StatusCode::OK, "OK".to_string()),
        Err(e) => {
            error!("Callback failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Report whether the alias store answers
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.service.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse { status: "ready", detail: None }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse { status: "degraded", detail: Some(e.to_string()) }),
        ),
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
