//! Conversation history
//!
//! One Exchange per processed utterance: the user text, the generated
//! thought, the generated response and a timestamp. The log is append-only;
//! entries never change after insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed turn: user text plus the thought and response it produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exchange {
    pub user: String,
    pub thought: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl Exchange {
    pub fn new(
        user: impl Into<String>,
        thought: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            thought: thought.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only ordered log of exchanges.
///
/// Storage is unbounded; callers that want a bounded view use `recent`.
#[derive(Debug, Default, Clone)]
pub struct HistoryLog {
    exchanges: Vec<Exchange>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exchange. Entries are immutable once appended.
    pub fn append(&mut self, exchange: Exchange) {
        self.exchanges.push(exchange);
    }

    /// Last `n` exchanges in insertion order, fewer if fewer exist.
    pub fn recent(&self, n: usize) -> &[Exchange] {
        let start = self.exchanges.len().saturating_sub(n);
        &self.exchanges[start..]
    }

    /// All exchanges in insertion order.
    pub fn all(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(n: usize) -> Exchange {
        Exchange::new(format!("user {}", n), format!("thought {}", n), format!("reply {}", n))
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = HistoryLog::new();
        assert!(log.is_empty());

        for n in 0..3 {
            log.append(exchange(n));
        }

        assert_eq!(log.len(), 3);
        let users: Vec<_> = log.all().iter().map(|e| e.user.as_str()).collect();
        assert_eq!(users, vec!["user 0", "user 1", "user 2"]);
    }

    #[test]
    fn test_recent_returns_last_n_in_order() {
        let mut log = HistoryLog::new();
        for n in 0..8 {
            log.append(exchange(n));
        }

        let window = log.recent(5);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].user, "user 3");
        assert_eq!(window[4].user, "user 7");
    }

    #[test]
    fn test_recent_with_fewer_than_n() {
        let mut log = HistoryLog::new();
        log.append(exchange(0));
        log.append(exchange(1));

        let window = log.recent(5);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].user, "user 0");
    }

    #[test]
    fn test_recent_does_not_mutate() {
        let mut log = HistoryLog::new();
        log.append(exchange(0));

        let before = log.all()[0].clone();
        let _ = log.recent(5);
        assert_eq!(log.all()[0], before);
    }

    #[test]
    fn test_exchange_timestamp_is_iso8601() {
        let json = serde_json::to_value(exchange(0)).unwrap();
        let ts = json["timestamp"].as_str().unwrap();
        assert!(ts.contains('T'));
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
