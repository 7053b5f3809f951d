//! Persona responder: classify an utterance into a reply bucket, then pick
//! one canned reply from that bucket.
//!
//! Classification is an ordered list of (keywords, category) rules evaluated
//! first-match over the lowercased utterance. Selection is uniform-random
//! over the bucket's literal reply list, drawn from a seedable generator so
//! tests can fix outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Enthusiasm, Joke, ReplyCategory, TurnAnalysis};
use crate::JOKE_GATE_THRESHOLD;

// =============================================================================
// CLASSIFIER RULES - first match wins, checked in this order
// =============================================================================

const CLASSIFIER_RULES: &[(&[&str], ReplyCategory)] = &[
    (&["hello", "hi", "hey"], ReplyCategory::Greeting),
    (
        &["code", "program", "javascript", "python"],
        ReplyCategory::Programming,
    ),
    (&["help", "stuck", "error"], ReplyCategory::Encouragement),
];

// =============================================================================
// REPLY TABLES
// =============================================================================

const GREETING_REPLIES: &[&str] = &[
    "Hello there, brilliant student! 🎓 I'm Professor Code, your enthusiastic programming mentor!",
    "Welcome to the world of code! I'm Professor Code, and I'm absolutely thrilled to help you learn!",
    "Greetings, future programmer! Professor Code here, ready to make coding an adventure!",
];

const PROGRAMMING_REPLIES: &[&str] = &[
    "Ah, a fantastic programming question! Let me break this down for you...",
    "Excellent question! Programming is like building with digital LEGO blocks...",
    "That's a wonderful topic to explore! Think of it this way...",
];

const ENCOURAGEMENT_REPLIES: &[&str] = &[
    "You're doing amazing! Every coder started exactly where you are now.",
    "That's the spirit! Debugging is just detective work - and you're becoming a great detective!",
    "Remember, every expert was once a beginner. You've got this!",
];

const DEFAULT_REPLIES: &[&str] = &[
    "That's an interesting question! Let me think about the best way to explain this...",
    "I love your curiosity! That's the mark of a true programmer.",
    "Great question! Here's how I like to think about it...",
];

/// Static thoughts; index 0 is a template interpolating the user message.
const THOUGHTS: &[&str] = &[
    "The student asked: \"{}\"",
    "Let me think about the best way to explain this...",
    "I should use an analogy that makes this concept click!",
    "How can I make this both educational and engaging?",
    "What examples would help them understand better?",
];

const JOKES: &[(&str, Option<&str>)] = &[
    (
        "Why do programmers prefer dark mode? Because light attracts bugs!",
        None,
    ),
    (
        "How many programmers does it take to change a light bulb? None, that's a hardware problem!",
        None,
    ),
    (
        "Why did the Python programmer go hungry? Their food was all in tuples - immutable!",
        Some("Tuples can't be changed after creation"),
    ),
    (
        "There are only 10 kinds of people: those who understand binary and those who don't.",
        Some("10 in binary is 2"),
    ),
];

/// Resolve an utterance to a reply bucket. First-match over the rule order;
/// unmatched input falls through to the default bucket. Never errors.
pub fn classify(utterance: &str) -> ReplyCategory {
    let message = utterance.to_lowercase();
    for (keywords, category) in CLASSIFIER_RULES {
        if keywords.iter().any(|kw| message.contains(kw)) {
            return *category;
        }
    }
    ReplyCategory::Default
}

/// Picks replies, thoughts and jokes from the fixed tables.
///
/// Holds the only random source in the crate. `new` seeds from entropy;
/// `with_seed` makes every draw deterministic for tests.
#[derive(Debug)]
pub struct PersonaResponder {
    rng: StdRng,
}

impl Default for PersonaResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonaResponder {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn replies(category: ReplyCategory) -> &'static [&'static str] {
        match category {
            ReplyCategory::Greeting => GREETING_REPLIES,
            ReplyCategory::Programming => PROGRAMMING_REPLIES,
            ReplyCategory::Encouragement => ENCOURAGEMENT_REPLIES,
            ReplyCategory::Default => DEFAULT_REPLIES,
        }
    }

    /// Uniform-random reply from the bucket's literal list.
    pub fn pick_reply(&mut self, category: ReplyCategory) -> String {
        let options = Self::replies(category);
        options[self.rng.gen_range(0..options.len())].to_string()
    }

    /// Uniform-random internal thought for an utterance.
    pub fn monologue(&mut self, utterance: &str) -> String {
        let index = self.rng.gen_range(0..THOUGHTS.len());
        if index == 0 {
            format!("The student asked: \"{}\"", utterance)
        } else {
            THOUGHTS[index].to_string()
        }
    }

    /// One full turn: thought plus response.
    pub fn respond(&mut self, utterance: &str) -> (String, String) {
        let thought = self.monologue(utterance);
        let reply = self.pick_reply(classify(utterance));
        (thought, reply)
    }

    /// Second categorization layer used by the CLI demo: topic, enthusiasm
    /// and whether this turn is a joke/teaching moment.
    pub fn assess(&self, utterance: &str) -> TurnAnalysis {
        let category = classify(utterance);
        let message = utterance.to_lowercase();

        let topic = CLASSIFIER_RULES
            .iter()
            .flat_map(|(keywords, _)| keywords.iter())
            .find(|kw| message.contains(*kw))
            .map(|kw| kw.to_string())
            .unwrap_or_else(|| "general curiosity".to_string());

        let enthusiasm = match category {
            ReplyCategory::Programming => Enthusiasm::High,
            ReplyCategory::Greeting | ReplyCategory::Encouragement => Enthusiasm::Medium,
            ReplyCategory::Default => Enthusiasm::Low,
        };

        TurnAnalysis {
            topic,
            enthusiasm,
            // Greetings get an ice-breaker; programming topics invite puns.
            tell_joke: matches!(
                category,
                ReplyCategory::Greeting | ReplyCategory::Programming
            ) || message.contains("joke"),
            teaching_opportunity: category == ReplyCategory::Programming
                || message.contains("how")
                || message.contains("why")
                || message.contains("what"),
        }
    }

    /// Joke gate: fires on ~70% of eligible turns.
    pub fn joke_gate(&mut self) -> bool {
        self.rng.gen::<f64>() > JOKE_GATE_THRESHOLD
    }

    pub fn pick_joke(&mut self) -> Joke {
        let (joke, explanation) = JOKES[self.rng.gen_range(0..JOKES.len())];
        Joke {
            joke: joke.to_string(),
            explanation: explanation.map(str::to_string),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
