//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify
//! that the heap invariants and shortest-path results always hold.

use proptest::prelude::*;
use shortest_path_heaps::binomial::BinomialHeap;
use shortest_path_heaps::d_ary::DAryHeap;
use shortest_path_heaps::graph::{Graph, WeightedGraph};
use shortest_path_heaps::pathfinding::{Dijkstra, Distance, QueueKind};
use shortest_path_heaps::{MergeableHeap, PriorityQueue};

/// Test that push and pop keep the minimum in sync with a model
fn test_push_pop_invariant<H: PriorityQueue<i32>>(
    mut heap: H,
    ops: Vec<(bool, i32)>,
) -> Result<(), TestCaseError> {
    let mut inserted: Vec<i32> = Vec::new();

    for (should_pop, value) in ops {
        if should_pop && !heap.is_empty() {
            let popped = heap.pop().unwrap();
            let expected = *inserted.iter().min().unwrap();
            prop_assert_eq!(popped, expected);
            let pos = inserted.iter().position(|&p| p == popped).unwrap();
            inserted.swap_remove(pos);
        } else {
            heap.push(value);
            inserted.push(value);
        }

        prop_assert_eq!(heap.top().ok().copied(), inserted.iter().min().copied());
    }

    Ok(())
}

/// Test that all popped elements are in non-decreasing order
fn test_pop_order_invariant<H: PriorityQueue<i32>>(
    mut heap: H,
    values: Vec<i32>,
) -> Result<(), TestCaseError> {
    for val in &values {
        heap.push(*val);
    }

    let mut popped = Vec::with_capacity(values.len());
    while !heap.is_empty() {
        popped.push(heap.pop().unwrap());
    }

    let mut expected = values;
    expected.sort_unstable();
    prop_assert_eq!(popped, expected);
    Ok(())
}

/// Test len() is always correct
fn test_len_invariant<H: PriorityQueue<i32>>(
    mut heap: H,
    ops: Vec<(bool, i32)>,
) -> Result<(), TestCaseError> {
    let mut expected_len = 0;

    for (should_pop, value) in ops {
        if should_pop && !heap.is_empty() {
            heap.pop().unwrap();
            expected_len -= 1;
        } else {
            heap.push(value);
            expected_len += 1;
        }

        prop_assert_eq!(heap.len(), expected_len);
        prop_assert_eq!(heap.is_empty(), expected_len == 0);
    }

    Ok(())
}

/// Reference shortest paths by Bellman-Ford relaxation
fn reference_distances(graph: &Graph, start: usize) -> Vec<Option<Distance>> {
    let n = graph.vertex_count();
    let mut distances = vec![None; n];
    distances[start] = Some(0);

    for _ in 0..n {
        for u in 0..n {
            let Some(du) = distances[u] else { continue };
            for (v, weight) in graph.neighbors(u).unwrap() {
                let candidate = du + Distance::from(weight);
                if distances[v].map_or(true, |dv| candidate < dv) {
                    distances[v] = Some(candidate);
                }
            }
        }
    }
    distances
}

/// Small arities, arities wider than any generated heap, and the extreme
fn arb_arity() -> impl Strategy<Value = usize> {
    prop_oneof![2usize..10, 200usize..1_000, Just(usize::MAX)]
}

fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..12).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 1u32..20), 0..(n * 3)).prop_map(move |edges| {
            let mut graph = Graph::new(n).unwrap();
            for (u, v, weight) in edges {
                // self-loops and duplicates are rejected; skipping them is the point
                let _ = graph.add_edge(u, v, weight);
            }
            graph
        })
    })
}

proptest! {
    #[test]
    fn test_dary_push_pop_invariant(
        arity in 2usize..8,
        ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..100)
    ) {
        test_push_pop_invariant(DAryHeap::new(arity).unwrap(), ops)?;
    }

    #[test]
    fn test_dary_pop_order_invariant(
        arity in arb_arity(),
        values in prop::collection::vec(-100i32..100, 1..100)
    ) {
        test_pop_order_invariant(DAryHeap::new(arity).unwrap(), values)?;
    }

    #[test]
    fn test_dary_len_invariant(
        arity in 2usize..8,
        ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..100)
    ) {
        test_len_invariant(DAryHeap::new(arity).unwrap(), ops)?;
    }

    #[test]
    fn test_dary_set_arity_restores_order(
        from in arb_arity(),
        to in arb_arity(),
        values in prop::collection::vec(-1000i32..1000, 0..200),
        pops_before in 0usize..20
    ) {
        let mut heap = DAryHeap::new(from).unwrap();
        let mut model = values.clone();
        model.sort_unstable();
        for value in values {
            heap.push(value);
        }

        let pops_before = pops_before.min(model.len());
        for expected in model.drain(..pops_before) {
            prop_assert_eq!(heap.pop().unwrap(), expected);
        }

        heap.set_arity(to).unwrap();
        prop_assert_eq!(heap.len(), model.len());

        let mut popped = Vec::new();
        while let Ok(value) = heap.pop() {
            popped.push(value);
        }
        prop_assert_eq!(popped, model);
    }

    #[test]
    fn test_binomial_push_pop_invariant(
        ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..100)
    ) {
        test_push_pop_invariant(BinomialHeap::new(), ops)?;
    }

    #[test]
    fn test_binomial_pop_order_invariant(values in prop::collection::vec(-100i32..100, 1..100)) {
        test_pop_order_invariant(BinomialHeap::new(), values)?;
    }

    #[test]
    fn test_binomial_len_invariant(
        ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..100)
    ) {
        test_len_invariant(BinomialHeap::new(), ops)?;
    }

    #[test]
    fn test_binomial_merge_invariant(
        heap1_values in prop::collection::vec(-100i32..100, 0..50),
        heap2_values in prop::collection::vec(-100i32..100, 0..50)
    ) {
        let mut heap1: BinomialHeap<i32> = heap1_values.iter().copied().collect();
        let mut heap2: BinomialHeap<i32> = heap2_values.iter().copied().collect();

        heap1.merge(&mut heap2);
        prop_assert!(heap2.is_empty());
        prop_assert_eq!(heap1.len(), heap1_values.len() + heap2_values.len());

        let mut expected: Vec<i32> = heap1_values.into_iter().chain(heap2_values).collect();
        expected.sort_unstable();
        let mut popped = Vec::new();
        while let Ok(value) = heap1.pop() {
            popped.push(value);
        }
        prop_assert_eq!(popped, expected);
    }

    #[test]
    fn test_binomial_clone_isolation(values in prop::collection::vec(-100i32..100, 1..60)) {
        let original: BinomialHeap<i32> = values.iter().copied().collect();
        let top_before = *original.top().unwrap();

        let mut copy = original.clone();
        while copy.pop().is_ok() {}

        prop_assert_eq!(original.len(), values.len());
        prop_assert_eq!(original.top().ok().copied(), Some(top_before));
    }

    #[test]
    fn test_dijkstra_matches_reference(graph in arb_graph(), arity in 2usize..6) {
        let dijkstra = Dijkstra::new(&graph).unwrap();
        for start in 0..graph.vertex_count() {
            let expected = reference_distances(&graph, start);
            prop_assert_eq!(
                dijkstra.shortest_paths(start, QueueKind::DAry { arity }).unwrap(),
                expected.clone()
            );
            prop_assert_eq!(
                dijkstra.shortest_paths(start, QueueKind::Binomial).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_predecessor_paths_have_shortest_length(graph in arb_graph()) {
        let dijkstra = Dijkstra::new(&graph).unwrap();
        let result = dijkstra
            .shortest_paths_with_predecessors(0, QueueKind::Binomial)
            .unwrap();

        for end in 0..graph.vertex_count() {
            let path = result.path_to(&graph, end).unwrap();
            match result.distance(end) {
                None => prop_assert!(path.is_empty()),
                Some(distance) => {
                    prop_assert_eq!(path.first().copied(), Some(0));
                    prop_assert_eq!(path.last().copied(), Some(end));
                    let length: Distance = path
                        .windows(2)
                        .map(|pair| Distance::from(graph.edge_weight(pair[0], pair[1]).unwrap().unwrap()))
                        .sum();
                    prop_assert_eq!(length, distance);
                }
            }
        }
    }
}
