//! Word-selection scheduler: score updates, priority ranking and
//! recency-aware choice of the next word to drill.

pub mod priority;
pub mod recency;
pub mod score;
pub mod selector;
pub mod stats;

pub use priority::{compare_by_priority, compute_priority, sort_by_priority, top_candidates};
pub use recency::{RecencyBuffer, DEFAULT_RECENCY_CAPACITY};
pub use score::{apply_answer, calc_next_slot, update_score, DEFAULT_SCORE_MULTIPLIER};
pub use selector::pick_next;
pub use stats::{HasWordId, HasWordStats, WordCandidate, WordId, WordStats};
