//! Graph generators
//!
//! Builders for the complete and random graphs used by tests and benchmarks.

use crate::graph::{Graph, GraphError, Weight};
use rand::Rng;
use tracing::debug;

/// Builds the complete graph on `vertex_count` vertices
///
/// The edge between `i` and `j` weighs `i + j + 1`, so lighter edges gather
/// around the low-numbered vertices.
///
/// # Errors
/// Returns [`GraphError::NoVertices`] if `vertex_count` is 0, or
/// [`GraphError::TooManyVertices`] if the graph cannot be allocated.
pub fn complete_graph(vertex_count: usize) -> Result<Graph, GraphError> {
    let mut graph = Graph::new(vertex_count)?;
    for i in 0..vertex_count {
        for j in (i + 1)..vertex_count {
            let weight = Weight::try_from(i + j + 1).unwrap_or(Weight::MAX);
            graph.add_edge(i, j, weight)?;
        }
    }
    debug!(vertex_count, edges = graph.edge_count(), "generated complete graph");
    Ok(graph)
}

/// Builds a random graph in the G(n, p) model
///
/// Each of the `n(n-1)/2` vertex pairs is joined independently with
/// probability `edge_probability`; weights are uniform in `1..=max_weight`.
/// `edge_probability` is clamped to `[0, 1]` (NaN counts as 0) and a
/// `max_weight` of 0 is treated as 1.
///
/// # Errors
/// Returns [`GraphError::NoVertices`] if `vertex_count` is 0, or
/// [`GraphError::TooManyVertices`] if the graph cannot be allocated.
///
/// # Example
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use shortest_path_heaps::generate::random_graph;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let graph = random_graph(10, 1.0, 5, &mut rng).unwrap();
/// assert_eq!(graph.edge_count(), 45);
/// ```
pub fn random_graph<R: Rng>(
    vertex_count: usize,
    edge_probability: f64,
    max_weight: Weight,
    rng: &mut R,
) -> Result<Graph, GraphError> {
    let mut graph = Graph::new(vertex_count)?;
    let probability = if edge_probability.is_nan() {
        0.0
    } else {
        edge_probability.clamp(0.0, 1.0)
    };
    let max_weight = max_weight.max(1);

    for i in 0..vertex_count {
        for j in (i + 1)..vertex_count {
            if rng.gen_bool(probability) {
                graph.add_edge(i, j, rng.gen_range(1..=max_weight))?;
            }
        }
    }
    debug!(
        vertex_count,
        probability,
        edges = graph.edge_count(),
        "generated random graph"
    );
    Ok(graph)
}
