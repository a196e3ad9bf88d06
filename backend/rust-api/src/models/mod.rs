use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod attempt;
pub mod check;
pub mod content;
pub mod hint;

pub use attempt::{Attempt, AttemptLog};

/// One labeled stage of the process the learner has to put in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub content: String,
    pub correct_index: usize,
    pub is_locked: bool,
}

impl Step {
    pub fn is_in_place(&self, position: usize) -> bool {
        self.correct_index == position
    }
}

/// Where the session is in its idle -> in_progress -> checked cycle.
///
/// The phase does not say whether correctness marks are shown: a reorder after
/// a check moves to `InProgress` while `feedback_visible` stays true. Read
/// `Session::feedback_visible` for the marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    InProgress,
    Checked,
}

/// The puzzle attempt currently on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub sequence: Vec<Step>,
    pub hints_used: u32,
    pub feedback_visible: bool,
    pub phase: SessionPhase,
}

impl Session {
    /// Builds a session around an already arranged sequence.
    pub fn from_sequence(sequence: Vec<Step>) -> Self {
        Self {
            sequence,
            hints_used: 0,
            feedback_visible: false,
            phase: SessionPhase::Idle,
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn locked_count(&self) -> usize {
        self.sequence.iter().filter(|step| step.is_locked).count()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReorderRequest {
    #[validate(length(min = 1, message = "order must list the step ids"))]
    pub order: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub id: String,
    pub content: String,
    pub is_locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

/// What the presentation layer renders for the current board.
#[derive(Debug, Serialize)]
pub struct PuzzleView {
    pub phase: SessionPhase,
    pub items: Vec<StepView>,
    pub hints_used: u32,
    pub hints_remaining: u32,
    pub hint_available: bool,
    pub feedback_visible: bool,
    pub last_score: Option<u32>,
    pub next_attempt_number: u32,
}
