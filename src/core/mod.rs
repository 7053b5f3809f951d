//! Core modules for the Professor Code soul engine

pub mod api;
pub mod client;
pub mod error;
pub mod relay;
pub mod responder;
pub mod session;

pub use api::{create_router, create_router_with_persona, run_server};
pub use client::run_client;
pub use error::EngineError;
pub use relay::{relay_socket, RelayConfig};
pub use responder::{classify, PersonaResponder};
pub use session::{Session, TurnEnvelopes};
