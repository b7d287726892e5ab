//! d-ary Heap implementation
//!
//! An array-backed min-heap whose nodes have `d` children instead of two.
//! Node `i` has its parent at `(i - 1) / d` and its children at
//! `d * i + 1 ..= d * i + d`.
//!
//! # Time Complexity
//!
//! | Operation    | Complexity      |
//! |--------------|-----------------|
//! | `push`       | O(log_d n)      |
//! | `pop`        | O(d · log_d n)  |
//! | `top`        | O(1)            |
//! | `set_arity`  | O(n)            |
//!
//! A wider heap is shallower, which makes `push` cheaper and `pop` more
//! expensive. Dijkstra performs many more pushes than pops on dense graphs,
//! which is why the arity is tunable.
//!
//! # Example
//!
//! ```rust
//! use shortest_path_heaps::PriorityQueue;
//! use shortest_path_heaps::d_ary::DAryHeap;
//!
//! let mut heap = DAryHeap::new(4).unwrap();
//! for value in [5, 3, 7, 1, 9] {
//!     heap.push(value);
//! }
//!
//! heap.set_arity(2).unwrap();
//! assert_eq!(heap.pop(), Ok(1));
//! assert_eq!(heap.pop(), Ok(3));
//! ```

use crate::traits::{HeapError, PriorityQueue};
use tracing::debug;

/// Smallest branching factor accepted by [`DAryHeap`]
pub const MIN_ARITY: usize = 2;

/// A d-ary min-heap
#[derive(Debug, Clone)]
pub struct DAryHeap<T> {
    /// Complete d-ary tree stored level by level
    data: Vec<T>,
    /// Branching factor, always >= [`MIN_ARITY`]
    arity: usize,
}

impl<T: Ord> DAryHeap<T> {
    /// Creates an empty heap with the given branching factor
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidArity`] if `arity < 2`.
    pub fn new(arity: usize) -> Result<Self, HeapError> {
        Self::with_capacity(arity, 0)
    }

    /// Creates an empty heap with room for `capacity` elements
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidArity`] if `arity < 2`.
    pub fn with_capacity(arity: usize, capacity: usize) -> Result<Self, HeapError> {
        validate_arity(arity)?;
        Ok(Self {
            data: Vec::with_capacity(capacity),
            arity,
        })
    }

    /// Returns the current branching factor
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Changes the branching factor and restores the heap property
    ///
    /// Changing `d` changes which indices are children of which, so the
    /// existing layout is generally no longer a valid heap. It is repaired by
    /// sifting down every internal node, from the last one back to the root.
    ///
    /// On error the heap is left untouched.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidArity`] if `arity < 2`.
    pub fn set_arity(&mut self, arity: usize) -> Result<(), HeapError> {
        validate_arity(arity)?;
        if arity == self.arity {
            return Ok(());
        }

        debug!(from = self.arity, to = arity, len = self.data.len(), "rebuilding d-ary heap");
        self.arity = arity;
        if self.data.len() > 1 {
            let last_internal = self.parent(self.data.len() - 1);
            for index in (0..=last_internal).rev() {
                self.sift_down(index);
            }
        }
        Ok(())
    }

    fn parent(&self, index: usize) -> usize {
        (index - 1) / self.arity
    }

    /// Saturates instead of overflowing, so a huge arity just means no children
    fn first_child(&self, index: usize) -> usize {
        self.arity.saturating_mul(index).saturating_add(1)
    }

    /// Move element at index up while it is smaller than its parent
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = self.parent(index);
            if self.data[index] < self.data[parent] {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down, swapping with the smallest of its children
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let first = self.first_child(index);
            if first >= len {
                break;
            }
            let last = first.saturating_add(self.arity).min(len);

            let mut smallest = index;
            for child in first..last {
                if self.data[child] < self.data[smallest] {
                    smallest = child;
                }
            }

            if smallest == index {
                break;
            }
            self.data.swap(index, smallest);
            index = smallest;
        }
    }
}

fn validate_arity(arity: usize) -> Result<(), HeapError> {
    if arity < MIN_ARITY {
        return Err(HeapError::InvalidArity(arity));
    }
    Ok(())
}

impl<T: Ord> PriorityQueue<T> for DAryHeap<T> {
    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    fn top(&self) -> Result<&T, HeapError> {
        self.data.first().ok_or(HeapError::EmptyContainer)
    }

    fn pop(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyContainer);
        }

        // swap_remove moves the last element into the root slot
        let min = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }
}

impl<T: Ord> Extend<T> for DAryHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_heap_property<T: Ord + std::fmt::Debug>(heap: &DAryHeap<T>) {
        for index in 1..heap.data.len() {
            let parent = heap.parent(index);
            assert!(
                heap.data[parent] <= heap.data[index],
                "parent {:?} at {} > child {:?} at {} (d = {})",
                heap.data[parent],
                parent,
                heap.data[index],
                index,
                heap.arity
            );
        }
    }

    fn drain<T: Ord>(heap: &mut DAryHeap<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(value) = heap.pop() {
            out.push(value);
        }
        out
    }

    #[test]
    fn test_rejects_small_arity() {
        assert_eq!(DAryHeap::<i32>::new(0).unwrap_err(), HeapError::InvalidArity(0));
        assert_eq!(DAryHeap::<i32>::new(1).unwrap_err(), HeapError::InvalidArity(1));
        assert!(DAryHeap::<i32>::new(2).is_ok());
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = DAryHeap::new(3).unwrap();
        assert!(heap.is_empty());

        heap.push(5);
        heap.push(1);
        heap.push(10);
        heap.push(3);

        assert_eq!(heap.len(), 4);
        assert_eq!(heap.top(), Ok(&1));
        assert_eq!(drain(&mut heap), vec![1, 3, 5, 10]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_empty_errors() {
        let mut heap = DAryHeap::<i32>::new(2).unwrap();
        assert_eq!(heap.top(), Err(HeapError::EmptyContainer));
        assert_eq!(heap.pop(), Err(HeapError::EmptyContainer));
    }

    #[test]
    fn test_pop_single_element() {
        let mut heap = DAryHeap::new(2).unwrap();
        heap.push(42);
        assert_eq!(heap.pop(), Ok(42));
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), Err(HeapError::EmptyContainer));
    }

    #[test]
    fn test_heap_property_after_pushes() {
        for arity in 2..=7 {
            let mut heap = DAryHeap::new(arity).unwrap();
            for value in (0..200).map(|i| (i * 7919) % 211) {
                heap.push(value);
                assert_heap_property(&heap);
            }
        }
    }

    #[test]
    fn test_set_arity_preserves_contents() {
        let mut heap = DAryHeap::new(2).unwrap();
        heap.extend([5, 3, 7, 1, 9]);
        heap.set_arity(5).unwrap();
        assert_eq!(heap.arity(), 5);
        assert_heap_property(&heap);
        assert_eq!(drain(&mut heap), vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_set_arity_decrease() {
        let mut heap = DAryHeap::new(8).unwrap();
        heap.extend((0..100).rev());
        heap.set_arity(2).unwrap();
        assert_heap_property(&heap);
        assert_eq!(drain(&mut heap), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_set_arity_invalid_leaves_heap_untouched() {
        let mut heap = DAryHeap::new(3).unwrap();
        heap.extend([4, 2, 8]);
        assert_eq!(heap.set_arity(1), Err(HeapError::InvalidArity(1)));
        assert_eq!(heap.set_arity(0), Err(HeapError::InvalidArity(0)));
        assert_eq!(heap.arity(), 3);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.top(), Ok(&2));
    }

    #[test]
    fn test_set_arity_on_empty_and_single() {
        let mut heap = DAryHeap::<i32>::new(2).unwrap();
        heap.set_arity(4).unwrap();
        assert!(heap.is_empty());

        heap.push(1);
        heap.set_arity(3).unwrap();
        assert_eq!(heap.top(), Ok(&1));
    }

    #[test]
    fn test_huge_arity_acts_as_flat_heap() {
        let mut heap = DAryHeap::new(usize::MAX).unwrap();
        heap.extend([3, 1, 2, 5, 4]);
        assert_heap_property(&heap);
        assert_eq!(drain(&mut heap), vec![1, 2, 3, 4, 5]);

        heap.extend((0..50).rev());
        heap.set_arity(2).unwrap();
        assert_heap_property(&heap);
        heap.set_arity(usize::MAX - 1).unwrap();
        assert_heap_property(&heap);
        assert_eq!(drain(&mut heap), (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_set_arity_wider_than_len() {
        let mut heap = DAryHeap::new(2).unwrap();
        heap.extend([6, 2, 9, 4, 1, 8]);
        heap.set_arity(64).unwrap();
        assert_eq!(heap.arity(), 64);
        assert_heap_property(&heap);

        heap.push(0);
        assert_eq!(drain(&mut heap), vec![0, 1, 2, 4, 6, 8, 9]);
    }

    #[test]
    fn test_top_is_idempotent() {
        let mut heap = DAryHeap::new(2).unwrap();
        heap.extend([9, 4, 6]);
        assert_eq!(heap.top(), heap.top());
        assert_eq!(heap.len(), 3);
    }
}
