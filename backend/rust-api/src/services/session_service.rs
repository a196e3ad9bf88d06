use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;

use super::hint_service::{place_hint, HintPolicy};
use super::scoring_service::{count_correct, score_for};
use crate::models::check::CheckOutcome;
use crate::models::hint::HintOutcome;
use crate::models::{AttemptLog, PuzzleView, Session, SessionPhase, Step, StepView};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("reorder must list {expected} steps, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("unknown step id: {0}")]
    UnknownStep(String),

    #[error("step listed more than once: {0}")]
    DuplicateStep(String),
}

/// Fisher-Yates: walks from the last index down to 1, swapping each slot with
/// a uniformly chosen slot at or before it.
pub fn shuffle_steps<R: Rng>(steps: &[Step], rng: &mut R) -> Vec<Step> {
    let mut shuffled = steps.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Fresh session over a random permutation of `steps`, all unlocked.
pub fn initialize<R: Rng>(steps: &[Step], rng: &mut R) -> Session {
    let unlocked: Vec<Step> = steps
        .iter()
        .cloned()
        .map(|step| Step {
            is_locked: false,
            ..step
        })
        .collect();
    Session::from_sequence(shuffle_steps(&unlocked, rng))
}

/// Owns the single active puzzle session and drives it through
/// reorder / hint / check / reset. Performs no I/O: callers persist the
/// attempt log after the operations that change it.
pub struct SessionService<R = StdRng> {
    steps: Vec<Step>,
    session: Session,
    policy: HintPolicy,
    rng: R,
    last_score: Option<u32>,
}

impl<R: Rng> SessionService<R> {
    pub fn new(steps: Vec<Step>, policy: HintPolicy, mut rng: R) -> Self {
        let session = initialize(&steps, &mut rng);
        tracing::debug!("Puzzle initialized with {} steps", steps.len());
        Self {
            steps,
            session,
            policy,
            rng,
            last_score: None,
        }
    }

    /// Starts from a known arrangement instead of a shuffle.
    pub fn with_session(steps: Vec<Step>, session: Session, policy: HintPolicy, rng: R) -> Self {
        Self {
            steps,
            session,
            policy,
            rng,
            last_score: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn policy(&self) -> HintPolicy {
        self.policy
    }

    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    /// Replaces the arrangement with `order`, which must name every current
    /// step exactly once. Lock adherence is left to the caller.
    pub fn reorder(&mut self, order: &[String]) -> Result<(), PuzzleError> {
        if order.len() != self.session.len() {
            return Err(PuzzleError::WrongLength {
                expected: self.session.len(),
                actual: order.len(),
            });
        }

        let by_id: HashMap<&str, &Step> = self
            .session
            .sequence
            .iter()
            .map(|step| (step.id.as_str(), step))
            .collect();
        let mut seen = HashSet::with_capacity(order.len());
        let mut sequence = Vec::with_capacity(order.len());

        for id in order {
            let step = by_id
                .get(id.as_str())
                .ok_or_else(|| PuzzleError::UnknownStep(id.clone()))?;
            if !seen.insert(id.as_str()) {
                return Err(PuzzleError::DuplicateStep(id.clone()));
            }
            sequence.push((*step).clone());
        }

        self.session.sequence = sequence;
        self.session.phase = SessionPhase::InProgress;
        Ok(())
    }

    pub fn hint_available(&self) -> bool {
        self.policy.allows(self.session.hints_used)
    }

    /// Does not consult the hint cap; see [`SessionService::hint_available`].
    pub fn apply_hint(&mut self) -> HintOutcome {
        let outcome = place_hint(&mut self.session, &mut self.rng);
        if let HintOutcome::Applied { step_id, from, to } = &outcome {
            tracing::info!(
                "Hint placed step={} from={} to={}, hints_used={}",
                step_id,
                from,
                to,
                self.session.hints_used
            );
        }
        outcome
    }

    pub fn check(&mut self, history: &mut AttemptLog, now: DateTime<Utc>) -> CheckOutcome {
        let total_items = self.session.len();
        let correct_count = count_correct(&self.session.sequence);
        let score = score_for(correct_count, total_items);
        let attempt = history.record(score, self.session.hints_used, now);

        self.session.feedback_visible = true;
        self.session.phase = SessionPhase::Checked;
        self.last_score = Some(score);

        tracing::info!(
            "Attempt {} checked: {}/{} correct, score={}, hints_used={}",
            attempt.attempt_number,
            correct_count,
            total_items,
            score,
            attempt.hints_used
        );

        CheckOutcome {
            score,
            correct_count,
            total_items,
            attempt,
        }
    }

    /// Reshuffles with all locks, hints and feedback cleared. History is kept.
    pub fn reset(&mut self) {
        self.session = initialize(&self.steps, &mut self.rng);
        tracing::info!("Puzzle reshuffled");
    }

    pub fn full_reset(&mut self, history: &mut AttemptLog) {
        history.clear();
        self.last_score = None;
        self.reset();
    }

    pub fn view(&self, history: &AttemptLog) -> PuzzleView {
        let feedback_visible = self.session.feedback_visible;
        let items = self
            .session
            .sequence
            .iter()
            .enumerate()
            .map(|(position, step)| StepView {
                id: step.id.clone(),
                content: step.content.clone(),
                is_locked: step.is_locked,
                is_correct: (feedback_visible && !step.is_locked)
                    .then(|| step.is_in_place(position)),
            })
            .collect();

        PuzzleView {
            phase: self.session.phase,
            items,
            hints_used: self.session.hints_used,
            hints_remaining: self.policy.remaining(self.session.hints_used),
            hint_available: self.hint_available(),
            feedback_visible,
            last_score: self.last_score,
            next_attempt_number: history.next_attempt_number(),
        }
    }
}
