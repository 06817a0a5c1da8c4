//! Property-based tests for digraph-core using proptest.
//!
//! Graphs are drawn as edge lists over a small vertex range so that
//! parallel edges, self-loops and cycles show up often.

use proptest::prelude::*;

use digraph_core::{are_connected, reachable_within, shortest_path, Graph, GraphError};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

const VERTEX_RANGE: u8 = 8;

fn arb_vertex() -> impl Strategy<Value = u8> {
    0..VERTEX_RANGE
}

/// Edge list plus a few isolated vertices.
fn arb_graph() -> impl Strategy<Value = Graph<u8>> {
    (
        prop::collection::vec((arb_vertex(), arb_vertex()), 0..24),
        prop::collection::vec(arb_vertex(), 0..3),
    )
        .prop_map(|(edges, isolated)| {
            let mut graph: Graph<u8> = edges.into_iter().collect();
            for v in isolated {
                graph.add_vertex(v);
            }
            graph
        })
}

// ===========================================================================
// Degree invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn out_degree_matches_neighbors(graph in arb_graph(), v in arb_vertex()) {
        prop_assert_eq!(graph.out_degree(&v), graph.neighbors(&v).len());
    }

    #[test]
    fn edge_count_is_sum_of_out_degrees(graph in arb_graph()) {
        let total: usize = graph.vertices().map(|v| graph.out_degree(v)).sum();
        prop_assert_eq!(graph.edge_count(), total);
    }

    #[test]
    fn edge_count_is_sum_of_in_degrees(graph in arb_graph()) {
        let total: usize = graph.vertices().map(|v| graph.in_degree(v)).sum();
        prop_assert_eq!(graph.edge_count(), total);
    }

    #[test]
    fn vertices_iterates_every_key_once(graph in arb_graph()) {
        prop_assert_eq!(graph.vertices().count(), graph.vertex_count());
    }
}

// ===========================================================================
// Mutation invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn add_then_remove_edge(mut graph in arb_graph(), a in arb_vertex(), b in arb_vertex()) {
        graph.add_edge(a, b);
        prop_assert!(graph.has_edge(&a, &b));
        prop_assert!(graph.contains_vertex(&a));
        prop_assert!(graph.contains_vertex(&b));

        graph.remove_edge(&a, &b);
        prop_assert!(!graph.has_edge(&a, &b));
    }

    #[test]
    fn remove_vertex_leaves_no_trace(mut graph in arb_graph(), v in arb_vertex()) {
        let was_present = graph.contains_vertex(&v);
        let before = graph.vertex_count();

        graph.remove_vertex(&v);

        prop_assert_eq!(graph.in_degree(&v), 0);
        prop_assert_eq!(graph.out_degree(&v), 0);
        prop_assert!(!graph.contains_vertex(&v));
        prop_assert!(graph.vertices().all(|u| *u != v));
        let expected = if was_present { before - 1 } else { before };
        prop_assert_eq!(graph.vertex_count(), expected);
    }

    #[test]
    fn every_neighbor_is_a_vertex(mut graph in arb_graph(), v in arb_vertex()) {
        graph.remove_vertex(&v);
        for u in graph.vertices() {
            for n in graph.neighbors_slice(u) {
                prop_assert!(graph.contains_vertex(n));
            }
        }
    }
}

// ===========================================================================
// Traversal invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn connected_matches_neighborhood(graph in arb_graph(), a in arb_vertex(), b in arb_vertex()) {
        prop_assume!(a != b);
        match are_connected(&graph, &a, &b) {
            Ok(connected) => {
                let reached = reachable_within(&graph, &a, u32::MAX).unwrap();
                prop_assert_eq!(connected, reached.iter().any(|r| r.vertex == b));
            }
            Err(err) => {
                prop_assert!(!graph.contains_vertex(&a));
                prop_assert_eq!(err, GraphError::VertexNotFound { vertex: a });
            }
        }
    }

    #[test]
    fn shortest_path_is_a_minimal_walk(graph in arb_graph(), a in arb_vertex(), b in arb_vertex()) {
        prop_assume!(a != b);
        prop_assume!(graph.contains_vertex(&a));

        match shortest_path(&graph, &a, &b) {
            Ok(path) => {
                prop_assert_eq!(path.first(), Some(&a));
                prop_assert_eq!(path.last(), Some(&b));
                for hop in path.windows(2) {
                    prop_assert!(graph.has_edge(&hop[0], &hop[1]));
                }

                let reached = reachable_within(&graph, &a, u32::MAX).unwrap();
                let target = reached.iter().find(|r| r.vertex == b).unwrap();
                prop_assert_eq!(path.len() - 1, target.distance as usize);
            }
            Err(err) => {
                prop_assert_eq!(are_connected(&graph, &a, &b), Ok(false));
                prop_assert_eq!(err, GraphError::Unreachable { origin: a, destination: b });
            }
        }
    }

    #[test]
    fn self_reachability_requires_cycle(graph in arb_graph(), v in arb_vertex()) {
        prop_assume!(graph.contains_vertex(&v));
        let on_cycle = graph
            .vertices()
            .any(|u| graph.has_edge(u, &v) && (*u == v || are_connected(&graph, &v, u) == Ok(true)));
        prop_assert_eq!(are_connected(&graph, &v, &v), Ok(on_cycle));
    }
}
