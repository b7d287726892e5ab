//! Weighted undirected graphs consumed by the shortest-path engine
//!
//! The engine only needs the [`WeightedGraph`] contract: a vertex count and
//! an edge-weight lookup. [`Graph`] is the adjacency-matrix implementation
//! used throughout the crate.
//!
//! # Example
//!
//! ```rust
//! use shortest_path_heaps::graph::{Graph, WeightedGraph};
//!
//! let mut graph = Graph::new(3).unwrap();
//! graph.add_edge(0, 1, 4).unwrap();
//!
//! assert_eq!(graph.edge_weight(1, 0), Ok(Some(4)));
//! assert_eq!(graph.edge_weight(1, 2), Ok(None));
//! assert!(!graph.is_connected());
//! ```

use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Edge weight. Weights are strictly positive; zero is rejected on insertion.
pub type Weight = u32;

/// Errors raised while building or querying a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A graph must have at least one vertex
    #[error("graph must have at least one vertex")]
    NoVertices,
    /// The adjacency matrix for this many vertices cannot be allocated
    #[error("cannot allocate an adjacency matrix for {0} vertices")]
    TooManyVertices(usize),
    /// A vertex index is not in `0..vertex_count`
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    OutOfRange { vertex: usize, vertex_count: usize },
    /// Edge weights must be positive
    #[error("edge weight must be positive, got {0}")]
    InvalidWeight(Weight),
    /// Edges from a vertex to itself are not supported
    #[error("self-loop on vertex {0} is not supported")]
    SelfLoop(usize),
    /// The edge already exists; parallel edges are not supported
    #[error("edge {0}-{1} already exists")]
    DuplicateEdge(usize, usize),
}

/// Read-only view of a weighted undirected graph
///
/// Implementors must be symmetric: `edge_weight(u, v) == edge_weight(v, u)`.
pub trait WeightedGraph {
    /// Number of vertices; vertex ids are `0..vertex_count()`
    fn vertex_count(&self) -> usize;

    /// Weight of the edge between `u` and `v`, or `None` if there is no edge
    ///
    /// # Errors
    /// Returns [`GraphError::OutOfRange`] if either vertex is out of range.
    fn edge_weight(&self, u: usize, v: usize) -> Result<Option<Weight>, GraphError>;

    /// Fails with [`GraphError::OutOfRange`] unless `vertex < vertex_count()`
    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        let vertex_count = self.vertex_count();
        if vertex >= vertex_count {
            return Err(GraphError::OutOfRange {
                vertex,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Rebuilds the path from `start` to `end` out of a predecessor array
    ///
    /// Returns the vertices from `start` to `end` inclusive, or an empty
    /// vector if following the predecessors from `end` never reaches `start`.
    ///
    /// # Errors
    /// Returns [`GraphError::OutOfRange`] if `start`, `end` or any visited
    /// predecessor is not a vertex of this graph.
    fn path_from_predecessors(
        &self,
        start: usize,
        end: usize,
        predecessors: &[Option<usize>],
    ) -> Result<Vec<usize>, GraphError> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;

        let mut path = vec![end];
        let mut at = end;
        // A well-formed predecessor chain is shorter than the vertex count;
        // anything longer is a cycle and cannot reach `start`.
        while at != start && path.len() <= self.vertex_count() {
            match predecessors.get(at).copied().flatten() {
                Some(prev) => {
                    self.check_vertex(prev)?;
                    path.push(prev);
                    at = prev;
                }
                None => return Ok(Vec::new()),
            }
        }

        if at != start {
            return Ok(Vec::new());
        }
        path.reverse();
        Ok(path)
    }
}

/// Adjacency-matrix graph
///
/// Stores `vertex_count²` optional weights, so it suits the small dense
/// graphs the engine is usually exercised with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    vertex_count: usize,
    /// Row-major `vertex_count × vertex_count` matrix, symmetric
    matrix: Vec<Option<Weight>>,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges
    ///
    /// # Errors
    /// - [`GraphError::NoVertices`] if `vertex_count` is 0
    /// - [`GraphError::TooManyVertices`] if the `vertex_count²` matrix
    ///   overflows `usize` or cannot be allocated
    pub fn new(vertex_count: usize) -> Result<Self, GraphError> {
        if vertex_count == 0 {
            return Err(GraphError::NoVertices);
        }
        let too_many = GraphError::TooManyVertices(vertex_count);
        let cells = vertex_count.checked_mul(vertex_count).ok_or(too_many)?;

        let mut matrix = Vec::new();
        matrix.try_reserve_exact(cells).map_err(|_| too_many)?;
        matrix.resize(cells, None);
        Ok(Self {
            vertex_count,
            matrix,
        })
    }

    fn index(&self, u: usize, v: usize) -> usize {
        u * self.vertex_count + v
    }

    /// Inserts the undirected edge `u`-`v`
    ///
    /// Validation happens before any mutation, so a failed call leaves the
    /// graph unchanged.
    ///
    /// # Errors
    /// - [`GraphError::InvalidWeight`] if `weight` is 0
    /// - [`GraphError::OutOfRange`] if either vertex is out of range
    /// - [`GraphError::SelfLoop`] if `u == v`
    /// - [`GraphError::DuplicateEdge`] if the edge already exists
    pub fn add_edge(&mut self, u: usize, v: usize, weight: Weight) -> Result<(), GraphError> {
        if weight == 0 {
            return Err(GraphError::InvalidWeight(weight));
        }
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        let forward = self.index(u, v);
        if self.matrix[forward].is_some() {
            return Err(GraphError::DuplicateEdge(u, v));
        }

        trace!(u, v, weight, "adding edge");
        let backward = self.index(v, u);
        self.matrix[forward] = Some(weight);
        self.matrix[backward] = Some(weight);
        Ok(())
    }

    /// Iterates over `(neighbor, weight)` pairs of `u`
    ///
    /// # Errors
    /// Returns [`GraphError::OutOfRange`] if `u` is out of range.
    pub fn neighbors(
        &self,
        u: usize,
    ) -> Result<impl Iterator<Item = (usize, Weight)> + '_, GraphError> {
        self.check_vertex(u)?;
        let row = &self.matrix[self.index(u, 0)..self.index(u + 1, 0)];
        Ok(row
            .iter()
            .enumerate()
            .filter_map(|(v, weight)| weight.map(|w| (v, w))))
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.matrix.iter().filter(|weight| weight.is_some()).count() / 2
    }

    /// Returns true if every vertex is reachable from vertex 0
    pub fn is_connected(&self) -> bool {
        let mut visited = vec![false; self.vertex_count];
        let mut stack = vec![0];
        visited[0] = true;
        let mut seen = 1;

        while let Some(current) = stack.pop() {
            let row = &self.matrix[self.index(current, 0)..self.index(current + 1, 0)];
            for (neighbor, weight) in row.iter().enumerate() {
                if weight.is_some() && !visited[neighbor] {
                    visited[neighbor] = true;
                    seen += 1;
                    stack.push(neighbor);
                }
            }
        }

        seen == self.vertex_count
    }
}

impl WeightedGraph for Graph {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn edge_weight(&self, u: usize, v: usize) -> Result<Option<Weight>, GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.matrix[self.index(u, v)])
    }
}

/// Renders the adjacency matrix, one row per line, `-` for a missing edge
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Adjacency matrix ({} vertices):", self.vertex_count)?;
        for row in self.matrix.chunks(self.vertex_count) {
            let cells: Vec<String> = row
                .iter()
                .map(|weight| match weight {
                    Some(w) => w.to_string(),
                    None => "-".to_string(),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
