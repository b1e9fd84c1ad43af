use crate::scheduler::recency::RecencyBuffer;
use crate::scheduler::stats::HasWordId;

/// Pick the next word from a priority-ordered candidate window.
///
/// Returns the first candidate not shown recently. When the recency buffer
/// covers the whole window the first candidate is returned anyway, so a
/// small vocabulary never stalls the exercise. `None` means the vocabulary
/// has no words.
///
/// Pushing the chosen id into `recency` is left to the caller.
pub fn pick_next<'a, T: HasWordId>(candidates: &'a [T], recency: &RecencyBuffer) -> Option<&'a T> {
    candidates
        .iter()
        .find(|c| !recency.contains(c.word_id()))
        .or_else(|| candidates.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::stats::{WordCandidate, WordStats};

    fn window() -> Vec<WordCandidate> {
        (1..=3)
            .map(|id| WordCandidate::new(id, WordStats::fresh()))
            .collect()
    }

    #[test]
    fn skips_recent_words() {
        let candidates = window();
        let mut recency = RecencyBuffer::default();
        recency.push(1);
        assert_eq!(pick_next(&candidates, &recency).map(|c| c.id), Some(2));
    }

    #[test]
    fn falls_back_to_first_when_all_recent() {
        let candidates = window();
        let mut recency = RecencyBuffer::default();
        for id in [3, 1, 2] {
            recency.push(id);
        }
        assert_eq!(pick_next(&candidates, &recency).map(|c| c.id), Some(1));
    }

    #[test]
    fn empty_window_yields_none() {
        let candidates: Vec<WordCandidate> = Vec::new();
        assert!(pick_next(&candidates, &RecencyBuffer::default()).is_none());
    }

    #[test]
    fn empty_recency_picks_head() {
        let candidates = window();
        assert_eq!(
            pick_next(&candidates, &RecencyBuffer::new(0)).map(|c| c.id),
            Some(1)
        );
    }

    #[test]
    fn drill_loop_rotates_through_small_vocabulary() {
        let candidates = window();
        let mut recency = RecencyBuffer::new(2);
        let mut shown = Vec::new();
        for _ in 0..6 {
            let next = pick_next(&candidates, &recency).unwrap();
            recency.push(next.id);
            shown.push(next.id);
        }
        assert_eq!(shown, vec![1, 2, 3, 1, 2, 3]);
    }
}
