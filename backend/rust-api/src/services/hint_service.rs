use rand::Rng;

use crate::models::hint::HintOutcome;
use crate::models::{Session, SessionPhase};

/// Boundary guard for hint requests. The cap never reaches the number of
/// steps, so at least one step always has to be placed by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintPolicy {
    max_hints: u32,
}

impl HintPolicy {
    pub fn new(configured_max: Option<u32>, total_items: usize) -> Self {
        let ceiling = total_items.saturating_sub(1) as u32;
        let max_hints = configured_max.map_or(ceiling, |max| max.min(ceiling));
        Self { max_hints }
    }

    pub fn max_hints(&self) -> u32 {
        self.max_hints
    }

    pub fn allows(&self, hints_used: u32) -> bool {
        hints_used < self.max_hints
    }

    pub fn remaining(&self, hints_used: u32) -> u32 {
        self.max_hints.saturating_sub(hints_used)
    }
}

/// Positions of unlocked steps that are out of place.
pub fn hint_candidates(session: &Session) -> Vec<usize> {
    session
        .sequence
        .iter()
        .enumerate()
        .filter(|(position, step)| !step.is_locked && !step.is_in_place(*position))
        .map(|(position, _)| position)
        .collect()
}

/// Moves one randomly chosen misplaced step into its slot and locks it.
///
/// The step is swapped with whatever occupies its correct slot; the displaced
/// step is left unlocked wherever it lands. When nothing is misplaced the
/// session is left untouched.
pub fn place_hint<R: Rng>(session: &mut Session, rng: &mut R) -> HintOutcome {
    let candidates = hint_candidates(session);
    if candidates.is_empty() {
        return HintOutcome::NothingToHint;
    }

    let from = candidates[rng.random_range(0..candidates.len())];
    let to = session.sequence[from].correct_index;

    session.sequence.swap(from, to);
    session.sequence[to].is_locked = true;
    session.hints_used += 1;
    session.feedback_visible = false;
    session.phase = SessionPhase::InProgress;

    HintOutcome::Applied {
        step_id: session.sequence[to].id.clone(),
        from,
        to,
    }
}
