//! Minimum-oriented binary heap keyed by the item's `Ord` instance.
//!
//! Both `insert` and `extract_min` are amortized O(log n): insertion lets
//! the backing vector double when full, extraction releases capacity once
//! occupancy drops to a quarter. Items with equal keys extract in an
//! unspecified order that depends on the incidental heap layout; callers
//! that need reproducible tie-breaking must encode it in the key itself.

use thiserror::Error;

/// Extraction from an empty queue.
///
/// The search loop re-seeds each frontier before the next extraction, so
/// hitting this indicates a defect rather than a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("priority queue underflow")]
pub struct Underflow;

/// A binary min-heap over a growable vector.
#[derive(Debug, Clone)]
pub struct MinHeap<T: Ord> {
    items: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty heap with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the heap holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The minimum item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Inserts an item.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the minimum item.
    pub fn extract_min(&mut self) -> Result<T, Underflow> {
        if self.items.is_empty() {
            return Err(Underflow);
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop().ok_or(Underflow)?;
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        // Hand memory back once occupancy falls to a quarter of capacity.
        if self.items.len() <= self.items.capacity() / 4 {
            self.items.shrink_to(self.items.capacity() / 2);
        }
        Ok(min)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.items[idx] >= self.items[parent] {
                break;
            }
            self.items.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let mut smallest = idx;
            let left = 2 * idx + 1;
            let right = left + 1;
            if left < len && self.items[left] < self.items[smallest] {
                smallest = left;
            }
            if right < len && self.items[right] < self.items[smallest] {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.items.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_ascending_order() {
        let mut heap = MinHeap::new();
        for value in [5, 1, 9, 3, 7, 2, 8, 4, 6, 0] {
            heap.insert(value);
        }
        assert_eq!(heap.len(), 10);

        let mut drained = Vec::new();
        while !heap.is_empty() {
            drained.push(heap.extract_min().unwrap());
        }
        assert_eq!(drained, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_underflow_on_empty() {
        let mut heap: MinHeap<u32> = MinHeap::new();
        assert_eq!(heap.extract_min(), Err(Underflow));

        heap.insert(1);
        assert_eq!(heap.extract_min(), Ok(1));
        assert_eq!(heap.extract_min(), Err(Underflow));
    }

    #[test]
    fn test_peek_tracks_minimum() {
        let mut heap = MinHeap::with_capacity(4);
        assert_eq!(heap.peek(), None);

        heap.insert(4);
        assert_eq!(heap.peek(), Some(&4));
        heap.insert(2);
        assert_eq!(heap.peek(), Some(&2));
        heap.insert(3);
        assert_eq!(heap.peek(), Some(&2));

        heap.extract_min().unwrap();
        assert_eq!(heap.peek(), Some(&3));
    }

    #[test]
    fn test_interleaved_insert_and_extract() {
        let mut heap = MinHeap::new();
        heap.insert(10);
        heap.insert(5);
        assert_eq!(heap.extract_min(), Ok(5));
        heap.insert(1);
        heap.insert(7);
        assert_eq!(heap.extract_min(), Ok(1));
        assert_eq!(heap.extract_min(), Ok(7));
        assert_eq!(heap.extract_min(), Ok(10));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_duplicate_keys_all_surface() {
        let mut heap = MinHeap::new();
        for value in [3, 1, 3, 1, 2] {
            heap.insert(value);
        }
        let mut drained = Vec::new();
        while let Ok(v) = heap.extract_min() {
            drained.push(v);
        }
        assert_eq!(drained, vec![1, 1, 2, 3, 3]);
    }
}
