//! Professor Code local soul engine
//!
//! A persona-driven conversational relay: a WebSocket/HTTP server that turns
//! each user utterance into an internal monologue followed by a staged
//! response, plus a terminal client and an in-process chat demo.

pub mod core;
pub mod types;

// =============================================================================
// TIMING
// =============================================================================

/// Delay between the internal_monologue and response envelopes (milliseconds).
/// The response is already computed before the delay starts; the pause only
/// stages the "thinking" effect for clients.
pub const RESPONSE_DELAY_MS: u64 = 1000;

// =============================================================================
// HISTORY
// =============================================================================

/// Number of exchanges exposed through the `state` envelope.
pub const STATE_HISTORY_WINDOW: usize = 5;

// =============================================================================
// PERSONA POLICY
// =============================================================================

/// Joke gate: an eligible turn tells a joke when a uniform draw exceeds
/// this value (~70% of eligible turns).
pub const JOKE_GATE_THRESHOLD: f64 = 0.3;

// =============================================================================
// NETWORK
// =============================================================================

/// Default listener port when neither --port nor $PORT is given.
pub const DEFAULT_PORT: u16 = 4000;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.1.0";
