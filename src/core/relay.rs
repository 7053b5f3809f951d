//! Turn relay: the per-connection WebSocket loop
//!
//! One inbound `chat` produces exactly one `internal_monologue` followed by
//! exactly one `response`, with a staged delay between them. Frames are
//! handled serially, so a second utterance arriving during the delay waits
//! in the transport until the current turn finishes - thought and response
//! pairs never interleave on one connection.

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use tracing::{debug, info, warn};

use crate::core::{EngineError, Session};
use crate::types::{ClientEnvelope, ServerEnvelope};
use crate::RESPONSE_DELAY_MS;

/// Relay tuning. The delay is injectable so tests can shrink or virtualize
/// it instead of waiting out the production 1s pause.
#[derive(Debug, Clone, Copy)]
pub struct RelayConfig {
    /// Pause between the monologue and response emissions.
    pub response_delay: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(RESPONSE_DELAY_MS),
        }
    }
}

/// Decode one text frame into a client envelope.
pub fn decode(text: &str) -> Result<ClientEnvelope, EngineError> {
    Ok(serde_json::from_str(text)?)
}

/// Drive one connection until the peer disconnects.
pub async fn relay_socket(mut socket: WebSocket, mut session: Session, config: RelayConfig) {
    info!("new websocket connection established");

    if send(&mut socket, &session.connection_envelope())
        .await
        .is_err()
    {
        return;
    }

    while let Some(Ok(message)) = socket.recv().await {
        match message {
            Message::Text(text) => {
                if handle_text(&mut socket, &mut session, config, &text)
                    .await
                    .is_err()
                {
                    // Transport failure; nothing more to send.
                    break;
                }
            }
            Message::Close(_) => break,
            // Ping/pong are answered by the transport; binary is ignored.
            _ => {}
        }
    }

    info!("websocket connection closed");
}

/// Handle one text frame. A malformed payload is answered with a single
/// `error` envelope and the connection stays open; only transport failures
/// bubble up.
async fn handle_text(
    socket: &mut WebSocket,
    session: &mut Session,
    config: RelayConfig,
    text: &str,
) -> Result<(), EngineError> {
    let envelope = match decode(text) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!("error processing message: {}", err);
            return send(socket, &ServerEnvelope::error("Error processing message")).await;
        }
    };
    debug!(?envelope, "received message");

    match envelope {
        ClientEnvelope::Chat { content, .. } => {
            let turn = session.process_chat(&content).await;
            send(socket, &turn.monologue).await?;
            // Staged pause for effect; the response is already computed.
            tokio::time::sleep(config.response_delay).await;
            send(socket, &turn.response).await
        }
        ClientEnvelope::GetState => send(socket, &session.state_envelope()).await,
    }
}

async fn send(socket: &mut WebSocket, envelope: &ServerEnvelope) -> Result<(), EngineError> {
    let json = serde_json::to_string(envelope)?;
    socket.send(Message::Text(json)).await?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
