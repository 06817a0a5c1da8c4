use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::hash::Hash;

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Tentative distance of a vertex the shortest-path search has not reached.
const INFINITE: u32 = u32::MAX;

/// A vertex found during a depth-limited neighborhood search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reached<V> {
    pub vertex: V,
    /// Hop count on a shortest path from the start vertex.
    pub distance: u32,
    /// One shortest path, start vertex first and `vertex` last.
    pub path: Vec<V>,
}

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeResult<V> {
    pub vertex: V,
    pub out_degree: usize,
    pub in_degree: usize,
    pub total_degree: usize,
}

/// Whether a directed path of one or more edges leads from `origin` to
/// `destination`.
///
/// Breadth-first search that succeeds as soon as `destination` shows up as a
/// neighbor during expansion. The start vertex itself never matches, so
/// `are_connected(g, v, v)` is false unless `v` lies on a cycle (a self-loop
/// counts). Callers wanting reflexive reachability must check equality
/// themselves.
///
/// Fails with `VertexNotFound` if `origin` is not in the graph. An absent
/// `destination` is simply unreachable.
pub fn are_connected<V: Eq + Hash + Clone>(
    graph: &Graph<V>,
    origin: &V,
    destination: &V,
) -> Result<bool, V> {
    if !graph.contains_vertex(origin) {
        return Err(GraphError::VertexNotFound {
            vertex: origin.clone(),
        });
    }

    let mut visited: HashSet<&V> = HashSet::new();
    let mut queue: VecDeque<&V> = VecDeque::new();

    visited.insert(origin);
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        for neighbor in graph.neighbors_slice(current) {
            if neighbor == destination {
                debug!(visited = visited.len(), "destination reached");
                return Ok(true);
            }
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    debug!(visited = visited.len(), "frontier exhausted");
    Ok(false)
}

/// Frontier entry for the shortest-path search: min-heap on distance, then
/// on push order.
struct Candidate<'a, V> {
    distance: u32,
    seq: u64,
    vertex: &'a V,
}

impl<V> PartialEq for Candidate<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.seq == other.seq
    }
}

impl<V> Eq for Candidate<'_, V> {}

impl<V> Ord for Candidate<'_, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<V> PartialOrd for Candidate<'_, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimum-hop path from `origin` to `destination`, both endpoints included.
///
/// Expands a distance-ordered frontier with the relaxation
/// `dist[u] + 1 < dist[v]`, recording a predecessor for each improvement.
/// Ties are broken by push order, so the result is deterministic for a given
/// neighbor order.
///
/// Errors:
/// - `VertexNotFound` if `origin` is absent.
/// - `Unreachable` if `destination` is absent or no path leads to it.
///
/// When `origin == destination` and the vertex sits on a cycle, the result is
/// the single-element path `[origin]`.
pub fn shortest_path<V: Eq + Hash + Clone>(
    graph: &Graph<V>,
    origin: &V,
    destination: &V,
) -> Result<Vec<V>, V> {
    if !are_connected(graph, origin, destination)? {
        return Err(unreachable(origin, destination));
    }

    let mut distance: HashMap<&V, u32> = HashMap::with_capacity(graph.vertex_count());
    let mut predecessor: HashMap<&V, &V> = HashMap::with_capacity(graph.vertex_count());
    let mut frontier: BinaryHeap<Candidate<'_, V>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    distance.insert(origin, 0);
    frontier.push(Candidate {
        distance: 0,
        seq,
        vertex: origin,
    });

    while let Some(Candidate { vertex: u, .. }) = frontier.pop() {
        let du = distance.get(u).copied().unwrap_or(INFINITE);

        for v in graph.neighbors_slice(u) {
            let dv = distance.get(v).copied().unwrap_or(INFINITE);
            let candidate = du.saturating_add(1);
            if candidate < dv {
                distance.insert(v, candidate);
                predecessor.insert(v, u);

                // Every edge costs 1, so the first improvement to the
                // destination is final. Drop this early exit if edges ever
                // carry weights.
                if v == destination {
                    frontier.clear();
                    break;
                }

                seq += 1;
                frontier.push(Candidate {
                    distance: candidate,
                    seq,
                    vertex: v,
                });
            }
        }
    }

    let mut path = vec![destination.clone()];
    let mut current = destination;
    while current != origin {
        match predecessor.get(current) {
            Some(&parent) => {
                path.push(parent.clone());
                current = parent;
            }
            None => return Err(unreachable(origin, destination)),
        }
    }
    path.reverse();

    debug!(hops = path.len() - 1, "shortest path found");
    Ok(path)
}

fn unreachable<V: Clone>(origin: &V, destination: &V) -> GraphError<V> {
    GraphError::Unreachable {
        origin: origin.clone(),
        destination: destination.clone(),
    }
}

/// Every vertex reachable from `start` within `max_depth` outgoing hops.
///
/// Each vertex is reported once, at its minimum distance, in discovery
/// order (so distances are non-decreasing). The start vertex is excluded
/// even when a cycle leads back to it. Parent pointers are kept during the
/// search and paths are rebuilt only for the result.
pub fn reachable_within<V: Eq + Hash + Clone>(
    graph: &Graph<V>,
    start: &V,
    max_depth: u32,
) -> Result<Vec<Reached<V>>, V> {
    if !graph.contains_vertex(start) {
        return Err(GraphError::VertexNotFound {
            vertex: start.clone(),
        });
    }

    // vertex → (distance, parent). The start vertex is its own parent.
    let mut visited: HashMap<&V, (u32, &V)> = HashMap::new();
    let mut discovered: Vec<&V> = Vec::new();
    let mut queue: VecDeque<(&V, u32)> = VecDeque::new();

    visited.insert(start, (0, start));
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for neighbor in graph.neighbors_slice(current) {
            if !visited.contains_key(neighbor) {
                visited.insert(neighbor, (depth + 1, current));
                discovered.push(neighbor);
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    debug!(found = discovered.len(), max_depth, "neighborhood search done");

    Ok(discovered
        .into_iter()
        .map(|vertex| {
            let (distance, _) = visited[vertex];
            Reached {
                vertex: vertex.clone(),
                distance,
                path: reconstruct_path(&visited, start, vertex),
            }
        })
        .collect())
}

/// Walk parent pointers from `vertex` back to `start`.
fn reconstruct_path<V: Eq + Hash + Clone>(
    visited: &HashMap<&V, (u32, &V)>,
    start: &V,
    vertex: &V,
) -> Vec<V> {
    let mut path = vec![vertex.clone()];
    let mut current = vertex;

    while current != start {
        let &(_, parent) = &visited[current];
        path.push(parent.clone());
        current = parent;
    }

    path.reverse();
    path
}

/// The subgraph induced by the vertices within `max_depth` hops of `start`.
///
/// Holds `start`, every vertex `reachable_within` finds, and every edge
/// (parallel copies included) whose endpoints are both in that set.
/// Vertex and neighbor order follow the source graph.
pub fn extract_subgraph<V: Eq + Hash + Clone>(
    graph: &Graph<V>,
    start: &V,
    max_depth: u32,
) -> Result<Graph<V>, V> {
    let reached = reachable_within(graph, start, max_depth)?;

    let mut members: HashSet<&V> = HashSet::with_capacity(reached.len() + 1);
    members.insert(start);
    members.extend(reached.iter().map(|r| &r.vertex));

    let mut subgraph = Graph::with_capacity(members.len());
    for vertex in graph.vertices().filter(|v| members.contains(v)) {
        subgraph.add_vertex(vertex.clone());
    }
    for vertex in graph.vertices().filter(|v| members.contains(v)) {
        for neighbor in graph.neighbors_slice(vertex) {
            if members.contains(neighbor) {
                subgraph.add_edge(vertex.clone(), neighbor.clone());
            }
        }
    }

    Ok(subgraph)
}

/// Vertices ranked by total degree, descending.
///
/// Parallel edges count once per copy; a self-loop adds one to each of
/// in and out degree. Ties keep vertex insertion order. `top_n == 0`
/// returns every vertex.
pub fn degree_ranking<V: Eq + Hash + Clone>(graph: &Graph<V>, top_n: usize) -> Vec<DegreeResult<V>> {
    let mut in_degrees: HashMap<&V, usize> = HashMap::with_capacity(graph.vertex_count());
    for vertex in graph.vertices() {
        for neighbor in graph.neighbors_slice(vertex) {
            *in_degrees.entry(neighbor).or_insert(0) += 1;
        }
    }

    let mut results: Vec<DegreeResult<V>> = graph
        .vertices()
        .map(|vertex| {
            let out_degree = graph.out_degree(vertex);
            let in_degree = in_degrees.get(vertex).copied().unwrap_or(0);
            DegreeResult {
                vertex: vertex.clone(),
                out_degree,
                in_degree,
                total_degree: out_degree + in_degree,
            }
        })
        .collect();

    // Stable sort: equal totals stay in insertion order.
    results.sort_by(|a, b| b.total_degree.cmp(&a.total_degree));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
