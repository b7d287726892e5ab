//! Binomial Heap implementation
//!
//! A binomial heap is a forest of binomial trees with:
//! - O(log n) push and pop
//! - O(log n) top (no cached minimum; the roots are rescanned)
//! - O(log n) union of two forests
//!
//! # Algorithm Overview
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees
//! - Bₖ has exactly 2ᵏ nodes and height k
//!
//! The forest is a singly linked list of roots in strictly increasing degree
//! order, at most one root per degree. This mirrors the binary representation
//! of n: a heap of 13 elements holds B₀, B₂ and B₃.
//!
//! **Union** runs in two passes:
//! 1. Merge the two root lists by degree, like merging two sorted lists. The
//!    result may hold two roots of the same degree next to each other.
//! 2. Sweep once from left to right and link equal-degree neighbours, the
//!    larger key going under the smaller one. When three roots in a row share
//!    a degree the first is skipped so that the carry lands in order.
//!
//! # Storage
//!
//! Nodes live in a [`SlotMap`] arena owned by the heap. `child` and `sibling`
//! are the owning structure of each tree; `parent` is a plain back-index that
//! is only used for navigation. Because every link is a key into the heap's
//! own arena, cloning the heap is a deep copy and dropping it frees every
//! node at once.

use crate::traits::{HeapError, MergeableHeap, PriorityQueue};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::iter;
use std::mem;
use tracing::debug;

new_key_type! {
    /// Arena index of a node in a [`BinomialHeap`]
    struct NodeKey;
}

/// Internal node structure for binomial heap
///
/// **Binomial Tree Structure**: a node of degree k has exactly k children
/// with degrees k-1, k-2, ..., 0 along the sibling chain.
#[derive(Debug, Clone)]
struct Node<T> {
    key: T,
    /// Parent node (None if root)
    parent: Option<NodeKey>,
    /// First child, which is the highest-degree child
    child: Option<NodeKey>,
    /// Next root in the forest, or next child in the parent's child list
    sibling: Option<NodeKey>,
    /// Number of children
    degree: usize,
}

/// Binomial Heap
///
/// # Example
///
/// ```rust
/// use shortest_path_heaps::PriorityQueue;
/// use shortest_path_heaps::binomial::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// heap.push(5);
/// heap.push(1);
/// heap.push(3);
///
/// let copy = heap.clone();
/// assert_eq!(heap.pop(), Ok(1));
/// assert_eq!(copy.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct BinomialHeap<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    /// First root of the forest (lowest degree)
    head: Option<NodeKey>,
}

impl<T> Default for BinomialHeap<T> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
        }
    }
}

impl<T: Ord> BinomialHeap<T> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }

    /// Iterates over the forest roots in increasing degree order
    fn roots(&self) -> impl Iterator<Item = NodeKey> + '_ {
        iter::successors(self.head, move |&root| self.nodes[root].sibling)
    }

    /// Returns the minimum root and the root just before it, if any
    fn find_min_root(&self) -> Option<(Option<NodeKey>, NodeKey)> {
        let mut best: Option<(Option<NodeKey>, NodeKey)> = None;
        let mut prev = None;

        for root in self.roots() {
            if best.map_or(true, |(_, min)| self.nodes[root].key < self.nodes[min].key) {
                best = Some((prev, root));
            }
            prev = Some(root);
        }

        best
    }

    /// Makes `child` the first child of `parent`
    ///
    /// Both must be roots of equal degree; `parent` must not have the larger key.
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        let first = self.nodes[parent].child;

        let child_node = &mut self.nodes[child];
        child_node.parent = Some(parent);
        child_node.sibling = first;

        let parent_node = &mut self.nodes[parent];
        parent_node.child = Some(child);
        parent_node.degree += 1;
    }

    /// Merges two root lists into one list sorted by degree
    ///
    /// The result may contain at most two roots of any degree.
    fn merge_root_lists(
        &mut self,
        mut a: Option<NodeKey>,
        mut b: Option<NodeKey>,
    ) -> Option<NodeKey> {
        let mut head = None;
        let mut tail: Option<NodeKey> = None;

        while let (Some(x), Some(y)) = (a, b) {
            let next = if self.nodes[x].degree <= self.nodes[y].degree {
                a = self.nodes[x].sibling;
                x
            } else {
                b = self.nodes[y].sibling;
                y
            };
            match tail {
                Some(t) => self.nodes[t].sibling = Some(next),
                None => head = Some(next),
            }
            tail = Some(next);
        }

        let rest = a.or(b);
        match tail {
            Some(t) => self.nodes[t].sibling = rest,
            None => head = rest,
        }
        head
    }

    /// Unions two forests whose nodes already live in this arena
    ///
    /// Returns the head of a forest with at most one root per degree.
    fn union(&mut self, a: Option<NodeKey>, b: Option<NodeKey>) -> Option<NodeKey> {
        let mut head = self.merge_root_lists(a, b);
        let mut x = head?;
        let mut prev: Option<NodeKey> = None;
        let mut next = self.nodes[x].sibling;

        while let Some(n) = next {
            let x_degree = self.nodes[x].degree;
            let n_degree = self.nodes[n].degree;
            let carry_follows = self.nodes[n]
                .sibling
                .is_some_and(|after| self.nodes[after].degree == x_degree);

            if x_degree != n_degree || carry_follows {
                prev = Some(x);
                x = n;
            } else if self.nodes[x].key <= self.nodes[n].key {
                self.nodes[x].sibling = self.nodes[n].sibling;
                self.link(n, x);
            } else {
                match prev {
                    Some(p) => self.nodes[p].sibling = Some(n),
                    None => head = Some(n),
                }
                self.link(x, n);
                x = n;
            }
            next = self.nodes[x].sibling;
        }

        head
    }

    /// Detaches a child list and returns it as a forest
    ///
    /// Children hang off their parent in decreasing degree order, so the
    /// list is reversed to get the increasing order a forest needs.
    fn reverse_children(&mut self, mut current: Option<NodeKey>) -> Option<NodeKey> {
        let mut reversed = None;
        while let Some(key) = current {
            let node = &mut self.nodes[key];
            current = node.sibling;
            node.sibling = reversed;
            node.parent = None;
            reversed = Some(key);
        }
        reversed
    }

    /// Moves every node of `other` into this arena and returns its head, re-keyed
    fn adopt_nodes(&mut self, other: &mut Self) -> Option<NodeKey> {
        let mut remap: FxHashMap<NodeKey, NodeKey> =
            FxHashMap::with_capacity_and_hasher(other.nodes.len(), Default::default());
        for (old, node) in other.nodes.drain() {
            remap.insert(old, self.nodes.insert(node));
        }

        let rekey = |key: Option<NodeKey>| key.map(|k| remap[&k]);
        for &new in remap.values() {
            let node = &mut self.nodes[new];
            node.parent = rekey(node.parent);
            node.child = rekey(node.child);
            node.sibling = rekey(node.sibling);
        }

        rekey(other.head.take())
    }
}

impl<T: Ord> PriorityQueue<T> for BinomialHeap<T> {
    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Unions a single-node B₀ tree into the forest
    ///
    /// **Time Complexity**: O(log n) worst-case, like incrementing a binary
    /// counter: each link is a carry into the next degree.
    fn push(&mut self, value: T) {
        let node = self.nodes.insert(Node {
            key: value,
            parent: None,
            child: None,
            sibling: None,
            degree: 0,
        });
        let roots = self.head.take();
        self.head = self.union(roots, Some(node));
    }

    fn top(&self) -> Result<&T, HeapError> {
        let (_, min) = self.find_min_root().ok_or(HeapError::EmptyContainer)?;
        Ok(&self.nodes[min].key)
    }

    /// Removes and returns the minimum element
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Scan the roots for the minimum and unlink it from the root list
    /// 2. Its children are B_{k-1}, ..., B₀; reverse them into a forest
    /// 3. Union that forest with the remaining roots
    fn pop(&mut self) -> Result<T, HeapError> {
        let (prev, min) = self.find_min_root().ok_or(HeapError::EmptyContainer)?;
        let node = self.nodes.remove(min).ok_or(HeapError::EmptyContainer)?;

        match prev {
            Some(p) => self.nodes[p].sibling = node.sibling,
            None => self.head = node.sibling,
        }

        let children = self.reverse_children(node.child);
        let roots = self.head.take();
        self.head = self.union(roots, children);

        Ok(node.key)
    }
}

impl<T: Ord> MergeableHeap<T> for BinomialHeap<T> {
    /// Merges another heap into this heap, leaving `other` empty
    ///
    /// **Time Complexity**: the forest union is O(log n). Each heap owns its
    /// own arena, so the nodes of the smaller heap are first re-homed into
    /// the larger heap's arena, which is O(min(n, m)).
    fn merge(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }
        if self.nodes.len() < other.nodes.len() {
            mem::swap(self, other);
        }

        debug!(
            into = self.nodes.len(),
            adopted = other.nodes.len(),
            "merging binomial heaps"
        );
        let adopted = self.adopt_nodes(other);
        let roots = self.head.take();
        self.head = self.union(roots, adopted);
    }
}

impl<T: Ord> Extend<T> for BinomialHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinomialHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
