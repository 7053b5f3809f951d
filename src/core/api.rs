//! HTTP + WebSocket API for the soul engine
//!
//! Endpoints:
//! - GET /health      - Liveness check
//! - GET /personality - The persona definition
//! - GET /history     - Full exchange archive across all connections
//! - WS  /ws          - The turn relay (envelopes of types::envelope)
//!
//! HTTP and WebSocket share one listener. Each WebSocket connection gets its
//! own Session; the HTTP endpoints read only shared immutable persona data
//! and the append-only archive.

use std::sync::Arc;

use axum::{
    extract::{State, WebSocketUpgrade},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::core::{relay_socket, RelayConfig, Session};
use crate::types::{Exchange, HistoryLog, PersonaState};

/// Shared server state: immutable persona, append-only archive, relay tuning.
pub struct AppState {
    pub persona: Arc<PersonaState>,
    pub archive: Arc<RwLock<HistoryLog>>,
    pub config: RelayConfig,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub soul: String,
    pub timestamp: DateTime<Utc>,
}

/// Create the API router with the Professor Code persona.
pub fn create_router(config: RelayConfig) -> Router {
    create_router_with_persona(PersonaState::professor_code(), config)
}

/// Create the API router for an arbitrary persona.
pub fn create_router_with_persona(persona: PersonaState, config: RelayConfig) -> Router {
    let state = Arc::new(AppState {
        persona: Arc::new(persona),
        archive: Arc::new(RwLock::new(HistoryLog::new())),
        config,
    });

    Router::new()
        .route("/health", get(health))
        .route("/personality", get(personality))
        .route("/history", get(history))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        soul: state.persona.name.clone(),
        timestamp: Utc::now(),
    })
}

/// Persona definition, verbatim
async fn personality(State(state): State<Arc<AppState>>) -> Json<PersonaState> {
    Json((*state.persona).clone())
}

/// Full exchange archive, oldest first
async fn history(State(state): State<Arc<AppState>>) -> Json<Vec<Exchange>> {
    Json(state.archive.read().await.all().to_vec())
}

/// Upgrade to the turn relay; one fresh session per connection
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let session = Session::new(state.persona.clone(), state.archive.clone());
    let config = state.config;
    ws.on_upgrade(move |socket| relay_socket(socket, session, config))
}

/// Run the API server until the listener fails or the process exits.
pub async fn run_server(addr: &str, config: RelayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("websocket relay on ws://{}/ws", addr);
    info!("http endpoints on http://{}", addr);
    info!("Professor Code is ready to teach");
    axum::serve(listener, router).await?;
    Ok(())
}
