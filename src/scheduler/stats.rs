use serde::{Deserialize, Serialize};

pub type WordId = u64;

/// Learning statistics of one word pair.
///
/// Fields are optional because storage rows may predate the statistics
/// columns; readers go through the clamped accessors, which treat missing,
/// negative and NaN values as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, alias = "correct_count")]
    pub correct_count: Option<i64>,
    #[serde(default, alias = "wrong_count", alias = "mistakes")]
    pub wrong_count: Option<i64>,
}

impl WordStats {
    pub fn new(score: f64, correct_count: i64, wrong_count: i64) -> Self {
        Self {
            score: Some(score),
            correct_count: Some(correct_count),
            wrong_count: Some(wrong_count),
        }
    }

    /// Statistics of a word that was just added to a vocabulary.
    pub fn fresh() -> Self {
        Self::new(0.0, 0, 0)
    }

    pub fn clamped_score(&self) -> f64 {
        match self.score {
            Some(v) if !v.is_nan() => v.max(0.0),
            _ => 0.0,
        }
    }

    pub fn clamped_correct(&self) -> u64 {
        clamp_count(self.correct_count)
    }

    pub fn clamped_wrong(&self) -> u64 {
        clamp_count(self.wrong_count)
    }

    pub fn attempts(&self) -> u64 {
        self.clamped_correct().saturating_add(self.clamped_wrong())
    }

    /// `wrong / (attempts + 1)`; the extra attempt keeps a single miss on a
    /// new word from saturating the rate.
    pub fn error_rate(&self) -> f64 {
        self.clamped_wrong() as f64 / (self.attempts() as f64 + 1.0)
    }
}

fn clamp_count(value: Option<i64>) -> u64 {
    value.map(|v| v.max(0) as u64).unwrap_or(0)
}

/// Anything the scheduler can rank.
pub trait HasWordStats {
    fn word_stats(&self) -> WordStats;
}

/// Anything the scheduler can remember in a recency buffer.
pub trait HasWordId {
    fn word_id(&self) -> WordId;
}

impl HasWordStats for WordStats {
    fn word_stats(&self) -> WordStats {
        *self
    }
}

/// Minimal `{id, stats}` shape handed to the scheduler by storage adapters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCandidate {
    pub id: WordId,
    #[serde(flatten)]
    pub stats: WordStats,
}

impl WordCandidate {
    pub fn new(id: WordId, stats: WordStats) -> Self {
        Self { id, stats }
    }
}

impl HasWordStats for WordCandidate {
    fn word_stats(&self) -> WordStats {
        self.stats
    }
}

impl HasWordId for WordCandidate {
    fn word_id(&self) -> WordId {
        self.id
    }
}
