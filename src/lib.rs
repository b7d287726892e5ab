//! Shortest paths over interchangeable heaps
//!
//! This crate computes single-source shortest paths on weighted undirected
//! graphs with Dijkstra's algorithm, driven by one of two priority queues
//! that share the same minimal interface:
//!
//! - **d-ary Heap**: array-backed, branching factor chosen at run time and
//!   changeable on a live heap; O(log_d n) push, O(d log_d n) pop
//! - **Binomial Heap**: forest of binomial trees; O(log n) push, pop and union
//!
//! # Example
//!
//! ```rust
//! use shortest_path_heaps::generate::complete_graph;
//! use shortest_path_heaps::pathfinding::{Dijkstra, QueueKind};
//!
//! let graph = complete_graph(5).unwrap();
//! let dijkstra = Dijkstra::new(&graph).unwrap();
//!
//! let with_dary = dijkstra.shortest_paths(0, QueueKind::DAry { arity: 3 }).unwrap();
//! let with_binomial = dijkstra.shortest_paths(0, QueueKind::Binomial).unwrap();
//! assert_eq!(with_dary, with_binomial);
//! ```

pub mod binomial;
pub mod d_ary;
pub mod generate;
pub mod graph;
pub mod pathfinding;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{HeapError, MergeableHeap, PriorityQueue};
