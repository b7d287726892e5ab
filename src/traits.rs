//! Common traits for the frontier priority queues
//!
//! This module provides the two-tier trait hierarchy shared by the heaps in
//! this crate:
//!
//! - [`PriorityQueue`]: the minimal surface (`push`/`top`/`pop`/`is_empty`/`len`)
//!   that the shortest-path engine drives
//! - [`MergeableHeap`]: adds destructive union of two heaps
//!
//! Both heaps are min-heaps over a single `Ord` value. Callers that need a
//! separate priority and payload wrap them in a type whose `Ord` looks at the
//! priority only, as [`FrontierEntry`](crate::pathfinding::FrontierEntry) does.

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `top` or `pop` was called on a heap with no elements
    #[error("heap is empty")]
    EmptyContainer,
    /// A d-ary heap was built or reconfigured with a branching factor below 2
    #[error("arity must be at least 2, got {0}")]
    InvalidArity(usize),
}

/// Base trait for the priority queues in this crate
///
/// Unlike `std::collections::BinaryHeap`, these are min-heaps, and reading or
/// removing from an empty queue is reported as [`HeapError::EmptyContainer`]
/// instead of `None`.
///
/// # Example
///
/// ```rust
/// use shortest_path_heaps::PriorityQueue;
/// use shortest_path_heaps::d_ary::DAryHeap;
///
/// let mut heap = DAryHeap::new(3).unwrap();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.top(), Ok(&1));
/// assert_eq!(heap.pop(), Ok(1));
/// assert_eq!(heap.len(), 2);
/// ```
pub trait PriorityQueue<T: Ord> {
    /// Returns true if the queue holds no elements
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the queue
    fn len(&self) -> usize;

    /// Inserts a value
    ///
    /// # Time Complexity
    /// O(log n) for both implementations.
    fn push(&mut self, value: T);

    /// Returns the minimum without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyContainer`] if the queue is empty.
    fn top(&self) -> Result<&T, HeapError>;

    /// Removes and returns the minimum
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyContainer`] if the queue is empty.
    fn pop(&mut self) -> Result<T, HeapError>;
}

/// Extended trait for heaps that support union
///
/// # Example
///
/// ```rust
/// use shortest_path_heaps::{MergeableHeap, PriorityQueue};
/// use shortest_path_heaps::binomial::BinomialHeap;
///
/// let mut a: BinomialHeap<i32> = [5, 3].into_iter().collect();
/// let mut b: BinomialHeap<i32> = [7, 2].into_iter().collect();
///
/// a.merge(&mut b);
/// assert!(b.is_empty());
/// assert_eq!(a.len(), 4);
/// assert_eq!(a.top(), Ok(&2));
/// ```
pub trait MergeableHeap<T: Ord>: PriorityQueue<T> {
    /// Moves every element of `other` into this heap
    ///
    /// `other` is left empty; it keeps no elements after the call.
    fn merge(&mut self, other: &mut Self);
}
