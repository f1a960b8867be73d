//! Bounded newest-first history of draws.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of draws kept by default.
pub const DEFAULT_HISTORY_CAP: usize = 5;

/// A newest-first list capped at a fixed length.
///
/// Pushing onto a full buffer silently evicts the oldest item. A loaded
/// buffer holding more than its cap keeps only the newest `cap` items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredHistory<T>")]
pub struct HistoryBuffer<T> {
    items: VecDeque<T>,
    cap: usize,
}

#[derive(Deserialize)]
struct StoredHistory<T> {
    items: VecDeque<T>,
    cap: usize,
}

impl<T> From<StoredHistory<T>> for HistoryBuffer<T> {
    fn from(stored: StoredHistory<T>) -> Self {
        let mut items = stored.items;
        items.truncate(stored.cap);
        Self {
            items,
            cap: stored.cap,
        }
    }
}

impl<T> HistoryBuffer<T> {
    /// Create an empty buffer holding at most `cap` items.
    pub fn new(cap: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Prepend an item, dropping from the tail past the cap.
    pub fn push(&mut self, item: T) {
        self.items.push_front(item);
        self.items.truncate(self.cap);
    }

    /// Items newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// The most recent item.
    pub fn latest(&self) -> Option<&T> {
        self.items.front()
    }

    /// Maximum number of items kept.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> HistoryBuffer<T> {
    /// Snapshot of the contents, newest-first.
    pub fn to_list(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn newest_first_with_eviction() {
        let mut h = HistoryBuffer::new(5);
        for item in ["A", "B", "C", "D", "E", "F"] {
            h.push(item);
        }
        assert_eq!(h.to_list(), vec!["F", "E", "D", "C", "B"]);
        assert_eq!(h.latest(), Some(&"F"));
    }

    #[test]
    fn to_list_does_not_mutate() {
        let mut h = HistoryBuffer::new(3);
        h.push(1);
        h.push(2);
        assert_eq!(h.to_list(), vec![2, 1]);
        assert_eq!(h.to_list(), vec![2, 1]);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn zero_cap_holds_nothing() {
        let mut h = HistoryBuffer::new(0);
        h.push(1);
        assert!(h.is_empty());
    }

    #[test]
    fn default_cap_is_five() {
        let h: HistoryBuffer<u8> = HistoryBuffer::default();
        assert_eq!(h.cap(), 5);
    }

    #[test]
    fn round_trip_serde() {
        let mut h = HistoryBuffer::new(2);
        h.push("x".to_string());
        h.push("y".to_string());
        let json = serde_json::to_string(&h).unwrap();
        let h2: HistoryBuffer<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(h2, h);
    }

    #[test]
    fn loading_trims_to_cap() {
        let h: HistoryBuffer<u32> =
            serde_json::from_str(r#"{"items":[1,2,3,4,5,6,7],"cap":2}"#).unwrap();
        assert_eq!(h.cap(), 2);
        assert_eq!(h.to_list(), vec![1, 2]);
    }

    proptest! {
        #[test]
        fn keeps_last_cap_pushes_reversed(cap in 1usize..10, extra in 0usize..20) {
            let total = cap + extra;
            let mut h = HistoryBuffer::new(cap);
            for i in 0..total {
                h.push(i);
            }
            let expected: Vec<usize> = (extra..total).rev().collect();
            prop_assert_eq!(h.len(), cap);
            prop_assert_eq!(h.to_list(), expected);
        }

        #[test]
        fn never_exceeds_cap(cap in 0usize..8, pushes in 0usize..30) {
            let mut h = HistoryBuffer::new(cap);
            for i in 0..pushes {
                h.push(i);
                prop_assert!(h.len() <= cap);
            }
        }
    }
}
