//! Dijkstra's shortest paths over interchangeable priority queues
//!
//! The engine computes single-source shortest distances on a
//! [`WeightedGraph`], optionally recording a predecessor for every reached
//! vertex. The frontier is any [`PriorityQueue`] of [`FrontierEntry`]; the
//! two built-in choices are selected with [`QueueKind`].
//!
//! # Design
//!
//! Neither heap supports `decrease_key`, so the engine uses lazy deletion:
//! when a vertex's tentative distance improves, a new entry is pushed and the
//! old one stays in the queue. Stale entries are recognised and discarded
//! when they are popped for a vertex that is already settled.
//!
//! Equal-distance entries come out in an order that depends on the queue's
//! internal layout. Distances never depend on it, but which of several
//! equally short predecessors is recorded may differ between queue kinds.
//!
//! # Example
//!
//! ```rust
//! use shortest_path_heaps::graph::Graph;
//! use shortest_path_heaps::pathfinding::{Dijkstra, QueueKind};
//!
//! let mut graph = Graph::new(4).unwrap();
//! graph.add_edge(0, 1, 1).unwrap();
//! graph.add_edge(1, 2, 2).unwrap();
//! graph.add_edge(2, 3, 3).unwrap();
//! graph.add_edge(0, 3, 10).unwrap();
//!
//! let dijkstra = Dijkstra::new(&graph).unwrap();
//! let distances = dijkstra.shortest_paths(0, QueueKind::Binomial).unwrap();
//! assert_eq!(distances, vec![Some(0), Some(1), Some(3), Some(6)]);
//!
//! let result = dijkstra
//!     .shortest_paths_with_predecessors(0, QueueKind::DAry { arity: 4 })
//!     .unwrap();
//! assert_eq!(result.path_to(&graph, 3).unwrap(), vec![0, 1, 2, 3]);
//! ```

use crate::binomial::BinomialHeap;
use crate::d_ary::DAryHeap;
use crate::graph::{GraphError, WeightedGraph};
use crate::traits::{HeapError, PriorityQueue};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, trace};

/// Length of a path: the sum of its edge weights
pub type Distance = u64;

/// Errors raised by the shortest-path engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// The graph has no vertices
    #[error("cannot search a graph with no vertices")]
    InvalidGraph,
    /// The start vertex is not in `0..vertex_count`
    #[error("start vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    OutOfRange { vertex: usize, vertex_count: usize },
    /// A path was requested from a result computed without predecessors
    #[error("predecessors were not tracked for this search")]
    PredecessorsNotTracked,
    /// The frontier queue could not be built
    #[error(transparent)]
    Heap(#[from] HeapError),
    /// The graph rejected a lookup
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A frontier candidate: a vertex and a tentative distance to it.
///
/// Ordered by distance only, so two entries for different vertices at the
/// same distance compare equal.
#[derive(Debug, Clone, Copy)]
pub struct FrontierEntry {
    pub vertex: usize,
    pub distance: Distance,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.cmp(&other.distance)
    }
}

/// Which priority queue drives the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    /// [`DAryHeap`] with the given branching factor (must be >= 2)
    DAry { arity: usize },
    /// [`BinomialHeap`]
    Binomial,
}

impl Default for QueueKind {
    fn default() -> Self {
        QueueKind::DAry { arity: 2 }
    }
}

/// Options for a single search
///
/// ```rust
/// use shortest_path_heaps::pathfinding::{QueueKind, SearchConfig};
///
/// let config = SearchConfig::new()
///     .queue(QueueKind::Binomial)
///     .track_predecessors(true);
/// assert_eq!(config.queue_kind(), QueueKind::Binomial);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    queue: QueueKind,
    track_predecessors: bool,
}

impl SearchConfig {
    /// Binary heap frontier, no predecessor tracking
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frontier queue.
    pub fn queue(mut self, queue: QueueKind) -> Self {
        self.queue = queue;
        self
    }

    /// Records a predecessor for every reached vertex.
    pub fn track_predecessors(mut self, track: bool) -> Self {
        self.track_predecessors = track;
        self
    }

    /// The configured frontier queue
    pub fn queue_kind(&self) -> QueueKind {
        self.queue
    }

    /// Whether predecessors will be recorded
    pub fn tracks_predecessors(&self) -> bool {
        self.track_predecessors
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Vertices whose distance was finalised
    pub settled: usize,
    /// Entries popped for an already settled vertex
    pub stale_discarded: usize,
    /// Entries pushed onto the frontier, including the start
    pub pushes: usize,
}

/// Result of a search from one start vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    pub start: usize,
    /// Shortest distance to each vertex, `None` if unreachable
    pub distances: Vec<Option<Distance>>,
    /// Previous vertex on a shortest path, if tracking was requested.
    /// The start and unreachable vertices have `None`.
    pub predecessors: Option<Vec<Option<usize>>>,
    pub stats: SearchStats,
}

impl ShortestPaths {
    /// Shortest distance to `vertex`, or `None` if unreachable or out of range
    pub fn distance(&self, vertex: usize) -> Option<Distance> {
        self.distances.get(vertex).copied().flatten()
    }

    /// Returns true if `vertex` has a finite distance from the start
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).is_some()
    }

    /// Vertices on a shortest path from the start to `end`, both inclusive
    ///
    /// Empty if `end` is unreachable.
    ///
    /// # Errors
    /// - [`PathError::PredecessorsNotTracked`] if the search did not record predecessors
    /// - [`PathError::Graph`] if `end` is not a vertex of `graph`
    pub fn path_to<G: WeightedGraph + ?Sized>(
        &self,
        graph: &G,
        end: usize,
    ) -> Result<Vec<usize>, PathError> {
        let predecessors = self
            .predecessors
            .as_ref()
            .ok_or(PathError::PredecessorsNotTracked)?;
        Ok(graph.path_from_predecessors(self.start, end, predecessors)?)
    }
}

/// Shortest-path engine bound to one graph
///
/// The graph is borrowed for the engine's lifetime, so it cannot be mutated
/// while searches are possible.
#[derive(Debug)]
pub struct Dijkstra<'g, G: WeightedGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: WeightedGraph + ?Sized> Dijkstra<'g, G> {
    /// Creates an engine over `graph`
    ///
    /// # Errors
    /// Returns [`PathError::InvalidGraph`] if the graph has no vertices.
    pub fn new(graph: &'g G) -> Result<Self, PathError> {
        if graph.vertex_count() == 0 {
            return Err(PathError::InvalidGraph);
        }
        Ok(Self { graph })
    }

    /// The graph this engine searches
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Shortest distances from `start`, `None` for unreachable vertices
    ///
    /// # Errors
    /// - [`PathError::OutOfRange`] if `start` is not a vertex
    /// - [`PathError::Heap`] if `kind` asks for an arity below 2
    pub fn shortest_paths(
        &self,
        start: usize,
        kind: QueueKind,
    ) -> Result<Vec<Option<Distance>>, PathError> {
        let config = SearchConfig::new().queue(kind);
        Ok(self.run(start, &config)?.distances)
    }

    /// Shortest distances and predecessors from `start`
    ///
    /// # Errors
    /// Same as [`Dijkstra::shortest_paths`].
    pub fn shortest_paths_with_predecessors(
        &self,
        start: usize,
        kind: QueueKind,
    ) -> Result<ShortestPaths, PathError> {
        let config = SearchConfig::new().queue(kind).track_predecessors(true);
        self.run(start, &config)
    }

    /// Runs a search configured by `config`
    ///
    /// A fresh queue of the configured kind is built for every call.
    pub fn run(&self, start: usize, config: &SearchConfig) -> Result<ShortestPaths, PathError> {
        self.check_start(start)?;
        debug!(start, queue = ?config.queue, "starting shortest-path search");
        let result = match config.queue {
            QueueKind::DAry { arity } => {
                let frontier = DAryHeap::with_capacity(arity, self.graph.vertex_count())?;
                self.search_with(frontier, start, config.track_predecessors)
            }
            QueueKind::Binomial => {
                self.search_with(BinomialHeap::new(), start, config.track_predecessors)
            }
        }?;
        debug!(
            start,
            settled = result.stats.settled,
            stale_discarded = result.stats.stale_discarded,
            pushes = result.stats.pushes,
            "finished shortest-path search"
        );
        Ok(result)
    }

    fn check_start(&self, start: usize) -> Result<(), PathError> {
        let vertex_count = self.graph.vertex_count();
        if start >= vertex_count {
            return Err(PathError::OutOfRange {
                vertex: start,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Runs the search with a caller-supplied frontier queue
    ///
    /// Entries already in `frontier` act as extra sources: a vertex settled
    /// through one gets that entry's distance and no predecessor, so
    /// [`ShortestPaths::path_to`] returns an empty path for vertices reached
    /// only from such a source.
    ///
    /// # Errors
    /// - [`PathError::OutOfRange`] if `start` is not a vertex
    /// - [`PathError::Graph`] if a queued entry names a vertex outside the
    ///   graph, or the graph rejects an edge lookup
    pub fn search_with<Q>(
        &self,
        mut frontier: Q,
        start: usize,
        track_predecessors: bool,
    ) -> Result<ShortestPaths, PathError>
    where
        Q: PriorityQueue<FrontierEntry>,
    {
        self.check_start(start)?;
        let vertex_count = self.graph.vertex_count();

        let mut distances: Vec<Option<Distance>> = vec![None; vertex_count];
        let mut settled = vec![false; vertex_count];
        let mut predecessors = track_predecessors.then(|| vec![None; vertex_count]);
        let mut stats = SearchStats::default();

        distances[start] = Some(0);
        frontier.push(FrontierEntry {
            vertex: start,
            distance: 0,
        });
        stats.pushes += 1;

        while !frontier.is_empty() {
            let current = frontier.pop()?;
            let u = current.vertex;
            self.graph.check_vertex(u)?;

            if settled[u] {
                stats.stale_discarded += 1;
                continue;
            }
            settled[u] = true;
            stats.settled += 1;

            // Only a pre-seeded entry can settle below the recorded distance
            if distances[u].map_or(true, |known| current.distance < known) {
                distances[u] = Some(current.distance);
                if let Some(predecessors) = predecessors.as_mut() {
                    predecessors[u] = None;
                }
            }

            for v in 0..vertex_count {
                if settled[v] {
                    continue;
                }
                let weight = match self.graph.edge_weight(u, v)? {
                    Some(weight) if weight > 0 => weight,
                    _ => continue,
                };

                let candidate = current.distance + Distance::from(weight);
                if distances[v].map_or(true, |known| candidate < known) {
                    trace!(from = u, to = v, distance = candidate, "relaxed edge");
                    distances[v] = Some(candidate);
                    if let Some(predecessors) = predecessors.as_mut() {
                        predecessors[v] = Some(u);
                    }
                    frontier.push(FrontierEntry {
                        vertex: v,
                        distance: candidate,
                    });
                    stats.pushes += 1;
                }
            }
        }

        Ok(ShortestPaths {
            start,
            distances,
            predecessors,
            stats,
        })
    }
}
