use serde::{Deserialize, Serialize};

use super::Attempt;

/// Lowest score that still counts as a pass.
pub const PASS_THRESHOLD: u32 = 55;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Perfect,
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_score(score: u32) -> Self {
        if score == 100 {
            Verdict::Perfect
        } else if score >= PASS_THRESHOLD {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Perfect => "perfect",
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
        }
    }
}

/// Result of scoring the current board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub score: u32,
    pub correct_count: usize,
    pub total_items: usize,
    pub attempt: Attempt,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub score: u32,
    pub correct_count: usize,
    pub total_items: usize,
    pub hints_used: u32,
    pub max_reachable_score: u32,
    pub verdict: Verdict,
    pub celebrate: bool,
    pub attempt: Attempt,
}
