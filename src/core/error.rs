//! Error taxonomy for the soul engine
//!
//! Two failure classes: malformed inbound payloads and WebSocket transport
//! failures. Payload errors are answered with an `error` envelope and never
//! tear down the connection; transport errors end only the affected
//! connection.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("malformed message payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("websocket transport error: {0}")]
    Transport(String),
}

impl From<axum::Error> for EngineError {
    fn from(err: axum::Error) -> Self {
        EngineError::Transport(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for EngineError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        EngineError::Transport(err.to_string())
    }
}
