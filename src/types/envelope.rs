//! Wire envelopes
//!
//! Every message on the WebSocket is a JSON object discriminated by its
//! `type` field. Server-bound envelopes carry their payload inline;
//! client-bound envelopes nest it under `data`. There is no schema
//! versioning - receivers switch on `type` and ignore unknown fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Exchange, PersonaState};

/// Client -> server messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEnvelope {
    /// A user utterance for the persona to answer.
    Chat {
        content: String,
        /// Client-side send time. Informational; the server stamps its own.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<DateTime<Utc>>,
    },
    /// Request the current soul state snapshot.
    GetState,
}

impl ClientEnvelope {
    /// Build a `chat` envelope stamped with the current time.
    pub fn chat(content: impl Into<String>) -> Self {
        Self::Chat {
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }
}

/// Server -> client messages. Payload lives under `data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerEnvelope {
    /// Sent once, immediately after the WebSocket upgrade.
    Connection {
        message: String,
        personality: PersonaState,
        timestamp: DateTime<Utc>,
    },
    /// The soul's thought for the current utterance; always precedes the
    /// matching `response`.
    InternalMonologue {
        thought: String,
        timestamp: DateTime<Utc>,
    },
    Response {
        message: String,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    State {
        personality: PersonaState,
        current_thought: String,
        conversation_history: Vec<Exchange>,
    },
    Error { message: String },
}

impl ServerEnvelope {
    /// Discriminant string as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEnvelope::Connection { .. } => "connection",
            ServerEnvelope::InternalMonologue { .. } => "internal_monologue",
            ServerEnvelope::Response { .. } => "response",
            ServerEnvelope::State { .. } => "state",
            ServerEnvelope::Error { .. } => "error",
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
