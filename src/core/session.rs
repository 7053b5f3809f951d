//! Per-connection conversation state
//!
//! Each WebSocket connection owns exactly one `Session`: its own responder,
//! its own history and its own current thought. The personality is shared
//! read-only across sessions; the server-wide archive collects every
//! exchange for the `/history` endpoint but is never read back by sessions.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::PersonaResponder;
use crate::types::{Exchange, HistoryLog, PersonaState, ServerEnvelope};
use crate::STATE_HISTORY_WINDOW;

/// Both envelopes produced by one processed utterance, in emission order.
#[derive(Debug, Clone)]
pub struct TurnEnvelopes {
    pub monologue: ServerEnvelope,
    pub response: ServerEnvelope,
}

/// One client's conversation with the persona.
pub struct Session {
    persona: Arc<PersonaState>,
    responder: PersonaResponder,
    history: HistoryLog,
    current_thought: String,
    archive: Arc<RwLock<HistoryLog>>,
}

impl Session {
    pub fn new(persona: Arc<PersonaState>, archive: Arc<RwLock<HistoryLog>>) -> Self {
        Self::with_responder(persona, archive, PersonaResponder::new())
    }

    /// Session with a caller-supplied responder, used by tests to fix the
    /// random source.
    pub fn with_responder(
        persona: Arc<PersonaState>,
        archive: Arc<RwLock<HistoryLog>>,
        responder: PersonaResponder,
    ) -> Self {
        Self {
            persona,
            responder,
            history: HistoryLog::new(),
            current_thought: String::new(),
            archive,
        }
    }

    pub fn persona(&self) -> &PersonaState {
        &self.persona
    }

    /// Greeting envelope sent once after the upgrade.
    pub fn connection_envelope(&self) -> ServerEnvelope {
        ServerEnvelope::Connection {
            message: format!("Connected to {}'s Local Soul Engine!", self.persona.name),
            personality: (*self.persona).clone(),
            timestamp: Utc::now(),
        }
    }

    /// Process one utterance: generate thought and response, record the
    /// exchange in this session's log and the shared archive, and return the
    /// two envelopes in emission order. The relay stages the delay between
    /// them; both are computed up front.
    pub async fn process_chat(&mut self, content: &str) -> TurnEnvelopes {
        let (thought, response) = self.responder.respond(content);
        self.current_thought = thought.clone();

        let exchange = Exchange::new(content, &thought, &response);
        self.history.append(exchange.clone());
        self.archive.write().await.append(exchange);

        let timestamp = Utc::now();
        TurnEnvelopes {
            monologue: ServerEnvelope::InternalMonologue {
                thought,
                timestamp,
            },
            response: ServerEnvelope::Response {
                message: response,
                timestamp,
            },
        }
    }

    /// Snapshot of this session only: personality, current thought, and the
    /// recent history window.
    pub fn state_envelope(&self) -> ServerEnvelope {
        ServerEnvelope::State {
            personality: (*self.persona).clone(),
            current_thought: self.current_thought.clone(),
            conversation_history: self.history.recent(STATE_HISTORY_WINDOW).to_vec(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
