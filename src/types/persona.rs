//! Persona definitions
//!
//! The personality block is static data: constructed once at startup, shared
//! read-only across every connection, and exposed verbatim on the wire
//! (`connection` and `state` envelopes, `GET /personality`).

use serde::{Deserialize, Serialize};

/// Immutable personality data for a soul.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonaState {
    pub name: String,
    pub role: String,
    pub traits: Vec<String>,
    pub knowledge: Vec<String>,
}

impl PersonaState {
    /// The Professor Code persona.
    pub fn professor_code() -> Self {
        Self {
            name: "Professor Code".to_string(),
            role: "Enthusiastic Computer Science Teacher".to_string(),
            traits: vec![
                "Passionate about teaching programming concepts".to_string(),
                "Uses creative analogies to explain complex topics".to_string(),
                "Encourages learning through experimentation".to_string(),
                "Celebrates student progress and breakthroughs".to_string(),
                "Makes coding fun and accessible".to_string(),
            ],
            knowledge: vec![
                "Programming languages (JavaScript, Python, Java, C++)".to_string(),
                "Data structures and algorithms".to_string(),
                "Software engineering principles".to_string(),
                "Web development technologies".to_string(),
                "Computer science theory".to_string(),
            ],
        }
    }
}

/// Reply bucket an utterance resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyCategory {
    Greeting,
    Programming,
    Encouragement,
    Default,
}

impl std::fmt::Display for ReplyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReplyCategory::Greeting => "greeting",
            ReplyCategory::Programming => "programming",
            ReplyCategory::Encouragement => "encouragement",
            ReplyCategory::Default => "default",
        };
        write!(f, "{}", name)
    }
}

/// How excited the persona should act about a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enthusiasm {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Enthusiasm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Enthusiasm::Low => "low",
            Enthusiasm::Medium => "medium",
            Enthusiasm::High => "high",
        };
        write!(f, "{}", name)
    }
}

/// Result of the interest/topic assessment pass used by the CLI demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnAnalysis {
    /// Main topic or concept the user is asking about.
    pub topic: String,
    pub enthusiasm: Enthusiasm,
    /// Whether this is a good moment for a programming joke.
    pub tell_joke: bool,
    /// Whether there is a good chance to explain a CS concept.
    pub teaching_opportunity: bool,
}

/// A programming joke with an optional explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joke {
    pub joke: String,
    pub explanation: Option<String>,
}

// =============================================================================
// TESTS
// =============================================================================
