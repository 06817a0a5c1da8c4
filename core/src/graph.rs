use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::io;

use tracing::{debug, trace};

/// In-memory directed multigraph: one ordered out-neighbor list per vertex.
///
/// Neighbor lists keep insertion order and may hold the same destination
/// more than once (parallel edges) or the vertex itself (self-loops).
/// Every identifier that appears in a neighbor list is also a key, so
/// traversals never step onto a vertex without an entry.
///
/// `order` records key insertion order. It drives `vertices()` and the
/// diagnostic dump so both are reproducible across runs.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    adjacency: HashMap<V, Vec<V>>,
    order: Vec<V>,
}

impl<V> Graph<V> {
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(vertex_count),
            order: Vec::with_capacity(vertex_count),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total edge count. Parallel edges and self-loops each count once per copy.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Vertices in the order they were first added.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.order.iter()
    }
}

impl<V: Eq + Hash + Clone> Graph<V> {
    /// Insert a vertex with no edges. Does nothing if it is already present.
    pub fn add_vertex(&mut self, vertex: V) {
        if !self.adjacency.contains_key(&vertex) {
            self.order.push(vertex.clone());
            self.adjacency.insert(vertex, Vec::new());
        }
    }

    /// Remove a vertex together with every edge that starts or ends at it.
    ///
    /// All occurrences are stripped from every neighbor list, so parallel
    /// edges into the vertex disappear as well. Absent vertices are ignored.
    pub fn remove_vertex(&mut self, vertex: &V) {
        if self.adjacency.remove(vertex).is_none() {
            return;
        }
        self.order.retain(|v| v != vertex);

        let mut dropped = 0usize;
        for neighbors in self.adjacency.values_mut() {
            let before = neighbors.len();
            neighbors.retain(|n| n != vertex);
            dropped += before - neighbors.len();
        }
        debug!(incoming_dropped = dropped, "removed vertex");
    }

    /// Append a directed edge, creating either endpoint if needed.
    ///
    /// Never deduplicates: adding the same edge twice yields two parallel edges.
    pub fn add_edge(&mut self, origin: V, destination: V) {
        self.add_vertex(origin.clone());
        self.add_vertex(destination.clone());
        if let Some(neighbors) = self.adjacency.get_mut(&origin) {
            neighbors.push(destination);
        }
        trace!("added edge");
    }

    /// Remove every `origin -> destination` edge. Missing edges are ignored.
    pub fn remove_edge(&mut self, origin: &V, destination: &V) {
        if let Some(neighbors) = self.adjacency.get_mut(origin) {
            neighbors.retain(|n| n != destination);
        }
    }

    /// Bulk load `(origin, destination)` pairs. Each pair goes through `add_edge`.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (V, V)>,
    {
        for (origin, destination) in edges {
            self.add_edge(origin, destination);
        }
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Number of edges ending at `vertex`, counting parallel edges.
    ///
    /// Scans every neighbor list: O(V + E).
    pub fn in_degree(&self, vertex: &V) -> usize {
        self.adjacency
            .values()
            .map(|neighbors| neighbors.iter().filter(|n| *n == vertex).count())
            .sum()
    }

    /// Number of edges leaving `vertex`, counting parallel edges. 0 if absent.
    pub fn out_degree(&self, vertex: &V) -> usize {
        self.neighbors_slice(vertex).len()
    }

    /// Owned copy of the out-neighbors of `vertex`, in insertion order.
    pub fn neighbors(&self, vertex: &V) -> Vec<V> {
        self.neighbors_slice(vertex).to_vec()
    }

    /// Borrowed view of the out-neighbors. Empty for absent vertices.
    pub fn neighbors_slice(&self, vertex: &V) -> &[V] {
        self.adjacency
            .get(vertex)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// True if at least one `origin -> destination` edge exists.
    pub fn has_edge(&self, origin: &V, destination: &V) -> bool {
        self.neighbors_slice(origin).contains(destination)
    }

    /// Write the adjacency report to `out`: one `vertex: n1 n2 ...` line per
    /// vertex, in insertion order.
    pub fn describe<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        V: fmt::Display,
    {
        write!(out, "{}", self)
    }
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Eq + Hash + Clone> FromIterator<(V, V)> for Graph<V> {
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.load_edges(iter);
        graph
    }
}

impl<V: Eq + Hash + Clone> Extend<(V, V)> for Graph<V> {
    fn extend<I: IntoIterator<Item = (V, V)>>(&mut self, iter: I) {
        self.load_edges(iter);
    }
}

impl<V: Eq + Hash + Clone + fmt::Display> fmt::Display for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in &self.order {
            write!(f, "{}:", vertex)?;
            for neighbor in self.neighbors_slice(vertex) {
                write!(f, " {}", neighbor)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
