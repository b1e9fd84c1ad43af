use std::collections::VecDeque;

use serde::Serialize;

use crate::scheduler::stats::WordId;

pub const DEFAULT_RECENCY_CAPACITY: usize = 8;

/// Session-scoped FIFO of recently shown word ids.
///
/// Lives exactly as long as one exercise session. A capacity of zero keeps
/// nothing, which turns recency avoidance off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecencyBuffer {
    capacity: usize,
    ids: VecDeque<WordId>,
}

impl RecencyBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ids: VecDeque::with_capacity(capacity),
        }
    }

    /// Append the id just shown, evicting the oldest entries over capacity.
    pub fn push(&mut self, id: WordId) {
        self.ids.push_back(id);
        while self.ids.len() > self.capacity {
            self.ids.pop_front();
        }
    }

    pub fn contains(&self, id: WordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = WordId> + '_ {
        self.ids.iter().copied()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl Default for RecencyBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_RECENCY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_over_capacity() {
        let mut buf = RecencyBuffer::new(3);
        for id in 1..=5 {
            buf.push(id);
        }
        assert_eq!(buf.iter().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert!(!buf.contains(1));
        assert!(buf.contains(5));
    }

    #[test]
    fn zero_capacity_remembers_nothing() {
        let mut buf = RecencyBuffer::new(0);
        buf.push(1);
        assert!(buf.is_empty());
        assert!(!buf.contains(1));
    }

    #[test]
    fn default_capacity_is_eight() {
        let mut buf = RecencyBuffer::default();
        for id in 0..20 {
            buf.push(id);
        }
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.len(), 8);
        assert_eq!(buf.iter().next(), Some(12));
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buf = RecencyBuffer::new(2);
        buf.push(1);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 2);
    }
}
