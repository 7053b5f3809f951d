//! Core types for the Professor Code soul engine

mod envelope;
mod exchange;
mod persona;

pub use envelope::{ClientEnvelope, ServerEnvelope};
pub use exchange::{Exchange, HistoryLog};
pub use persona::{Enthusiasm, Joke, PersonaState, ReplyCategory, TurnAnalysis};
