use crate::models::content::MAX_SCORE;
use crate::models::Step;

/// Counts steps sitting in their correct slot. Locked (hinted) steps never
/// count, even when correctly placed.
pub fn count_correct(sequence: &[Step]) -> usize {
    sequence
        .iter()
        .enumerate()
        .filter(|(position, step)| step.is_in_place(*position) && !step.is_locked)
        .count()
}

/// `round(correct / total * 100)`.
pub fn score_for(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let ratio = correct.min(total) as f64 / total as f64;
    (ratio * MAX_SCORE as f64).round() as u32
}

/// Best score still reachable once `hints_used` steps are locked.
pub fn max_reachable_score(hints_used: u32, total: usize) -> u32 {
    let unlocked = total.saturating_sub(hints_used as usize);
    score_for(unlocked, total)
}
