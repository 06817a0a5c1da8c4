//! digraph-core: In-memory directed multigraph engine.
//!
//! A pure Rust library that maintains ordered out-neighbor lists per vertex
//! and answers degree, reachability and minimum-hop path queries. Parallel
//! edges and self-loops are first-class. All edges are unit weight.
//!
//! The engine has no I/O apart from [`Graph::describe`], which writes a
//! human-readable adjacency dump to any `io::Write`.

mod error;
mod graph;
mod traversal;

pub use error::{GraphError, Result};
pub use graph::Graph;
pub use traversal::{
    are_connected, degree_ranking, extract_subgraph, reachable_within, shortest_path,
    DegreeResult, Reached,
};
