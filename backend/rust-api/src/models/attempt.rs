use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed check. Field names follow the persisted browser layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub attempt_number: u32,
    pub score: u32,
    pub hints_used: u32,
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of attempts, oldest first. The only other mutation is
/// clearing it entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptLog(Vec<Attempt>);

impl AttemptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn next_attempt_number(&self) -> u32 {
        self.0.len() as u32 + 1
    }

    /// Appends a new attempt numbered after the existing ones.
    pub fn record(&mut self, score: u32, hints_used: u32, timestamp: DateTime<Utc>) -> Attempt {
        let attempt = Attempt {
            attempt_number: self.next_attempt_number(),
            score,
            hints_used,
            timestamp,
        };
        self.0.push(attempt.clone());
        attempt
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
