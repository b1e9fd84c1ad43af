use std::cmp::Ordering;

use crate::scheduler::stats::HasWordStats;

/// Weight of the error rate relative to the score penalty.
const ERROR_RATE_WEIGHT: f64 = 3.0;

/// Higher means "show sooner".
///
/// `3 * wrong / (attempts + 1) + 1 / (score + 1)`. A brand-new word has
/// priority 1, the same as an unscored word with a single miss.
pub fn compute_priority<S: HasWordStats + ?Sized>(item: &S) -> f64 {
    let stats = item.word_stats();
    let score_penalty = 1.0 / (stats.clamped_score() + 1.0);
    ERROR_RATE_WEIGHT * stats.error_rate() + score_penalty
}

/// Descending-priority ordering: `Less` means `a` should come first.
///
/// There is no secondary key; equal priorities compare `Equal` and keep
/// whatever order a stable sort was given.
pub fn compare_by_priority<S: HasWordStats + ?Sized>(a: &S, b: &S) -> Ordering {
    compute_priority(b)
        .partial_cmp(&compute_priority(a))
        .unwrap_or(Ordering::Equal)
}

/// Stable in-place sort, highest priority first.
pub fn sort_by_priority<S: HasWordStats>(items: &mut [S]) {
    items.sort_by(|a, b| compare_by_priority(a, b));
}

/// The `limit` highest-priority items, ties kept in input order.
pub fn top_candidates<S: HasWordStats>(mut items: Vec<S>, limit: usize) -> Vec<S> {
    if limit == 0 {
        return Vec::new();
    }
    // select_nth_unstable would lose input order among ties
    sort_by_priority(&mut items);
    items.truncate(limit);
    items
}
