use std::collections::HashSet;

use crate::scheduler::stats::WordStats;

/// Growth factor applied on a correct answer (and divisor on a wrong one).
pub const DEFAULT_SCORE_MULTIPLIER: f64 = 1.5;

/// Scores never fall below this floor.
pub const MIN_SCORE: f64 = 1.0;

/// Reinforce the score on a correct answer, decay it on a wrong one.
///
/// The result is floored at [`MIN_SCORE`], so every word keeps a baseline
/// chance of coming back and remains usable as a denominator.
pub fn update_score(score: f64, correct: bool, multiplier: f64) -> f64 {
    let updated = if correct {
        score * multiplier
    } else {
        score / multiplier
    };

    // NaN fails the comparison and is floored as well
    if updated >= MIN_SCORE {
        updated
    } else {
        MIN_SCORE
    }
}

/// Statistics after one more answer: score updated, matching counter bumped.
pub fn apply_answer(stats: &WordStats, correct: bool, multiplier: f64) -> WordStats {
    let correct_count = stats.clamped_correct() as i64;
    let wrong_count = stats.clamped_wrong() as i64;

    WordStats {
        score: Some(update_score(stats.clamped_score(), correct, multiplier)),
        correct_count: Some(correct_count.saturating_add(i64::from(correct))),
        wrong_count: Some(wrong_count.saturating_add(i64::from(!correct))),
    }
}

/// Queue slot for a word shown at `position`: `floor(position + score)`,
/// moved forward past slots that are already taken.
pub fn calc_next_slot(position: i64, score: f64, occupied: &HashSet<i64>) -> i64 {
    let mut slot = (position as f64 + score).floor() as i64;
    while occupied.contains(&slot) {
        slot += 1;
    }
    slot
}
