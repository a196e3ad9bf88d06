use serde::{Deserialize, Serialize};

pub const NOTHING_TO_HINT_NOTICE: &str =
    "Joh, alles ligt al goed (of vast)! Je hebt geen spiekbriefje meer nodig.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// The step moved from `from` into its correct slot `to` and is now locked.
    Applied {
        step_id: String,
        from: usize,
        to: usize,
    },
    /// Every unlocked step already sits in its correct slot.
    NothingToHint,
}

impl HintOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, HintOutcome::Applied { .. })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HintResponse {
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hinted_step_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub hints_used: u32,
    pub hints_remaining: u32,
}
