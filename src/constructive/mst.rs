//! Minimum-spanning-tree 2-approximation.
//!
//! # Algorithm
//!
//! 1. Grow a spanning tree from the start vertex with Prim's algorithm on a
//!    binary heap. If the heap drains while vertices are still unreached,
//!    the cheapest geodesic edge from the tree to an unreached vertex is
//!    materialized and the growth resumes from there.
//! 2. Walk the tree in preorder from the start vertex.
//! 3. Join consecutive vertices of the walk (real edge first, geodesic edge
//!    otherwise) and close back to the start.
//!
//! Under the triangle inequality the shortcut preorder walk costs at most
//! twice the tree, and the tree costs at most the optimal tour.
//!
//! # Complexity
//!
//! O(E log V) for Prim, O(V) for the walk, plus O(V²) per geodesic bridge.
//!
//! # Reference
//!
//! Prim, R.C. (1957). "Shortest connection networks and some
//! generalizations", *Bell System Technical Journal* 36(6), 1389-1401.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::error::Result;
use crate::models::{EdgeIndex, Graph, VertexIndex};
use crate::state::SearchState;

/// Min-heap entry ordered by key.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    key: f64,
    vertex: VertexIndex,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Builds a tour by preorder traversal of a Prim spanning tree.
///
/// Returns `None` if some vertex cannot be reached even through geodesic
/// edges, or if two consecutive vertices of the walk cannot be joined.
///
/// # Errors
///
/// [`Error::NullReference`](crate::Error::NullReference) if `start` is not a
/// vertex of `graph`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Graph;
/// use u_tsp::constructive::mst_approximation;
///
/// let mut g = Graph::new();
/// for id in 0..4 {
///     g.add_vertex(id, "", None).unwrap();
/// }
/// for (a, b, d) in [(0, 1, 10.0), (0, 2, 15.0), (0, 3, 20.0),
///                   (1, 2, 35.0), (1, 3, 25.0), (2, 3, 30.0)] {
///     g.add_edge(a, b, d).unwrap();
///     g.add_edge(b, a, d).unwrap();
/// }
///
/// let cycle = mst_approximation(&mut g, 0).unwrap().unwrap();
/// assert_eq!(cycle.len(), 4);
/// assert!(g.path_distance(&cycle) <= 2.0 * 80.0);
/// ```
pub fn mst_approximation(graph: &mut Graph, start: VertexIndex) -> Result<Option<Vec<EdgeIndex>>> {
    graph.check_vertex(start)?;
    let n = graph.num_vertices();
    let mut state = SearchState::new(n);

    if !grow_tree(graph, &mut state, start) {
        debug!("mst: spanning tree does not reach every vertex");
        return Ok(None);
    }

    let Some(order) = preorder(graph, &state, start) else {
        debug!("mst: spanning tree failed validation");
        return Ok(None);
    };

    let mut cycle = Vec::with_capacity(n);
    for i in 0..n {
        let (a, b) = (order[i], order[(i + 1) % n]);
        match graph.edge_or_geodesic(a, b) {
            Some(e) => cycle.push(e),
            None => {
                debug!(
                    "mst: cannot join {} -> {}",
                    graph.vertex(a).id(),
                    graph.vertex(b).id()
                );
                return Ok(None);
            }
        }
    }
    Ok(Some(cycle))
}

/// Prim's algorithm recording parent edges in `state`. Returns `false` if
/// some vertex stays unreachable.
fn grow_tree(graph: &mut Graph, state: &mut SearchState, start: VertexIndex) -> bool {
    let n = graph.num_vertices();
    let mut heap = BinaryHeap::new();
    let mut reached = 0;

    state.set_key(start, 0.0);
    heap.push(QueueEntry {
        key: 0.0,
        vertex: start,
    });

    while reached < n {
        let Some(QueueEntry { key, vertex: u }) = heap.pop() else {
            match bridge(graph, state) {
                Some((v, e)) => {
                    let d = graph.distance(e);
                    state.set_key(v, d);
                    state.set_path(v, Some(e));
                    heap.push(QueueEntry { key: d, vertex: v });
                    continue;
                }
                None => return false,
            }
        };
        // Stale entry left behind by a later decrease-key.
        if state.is_visited(u) || key > state.key(u) {
            continue;
        }
        state.set_visited(u, true);
        reached += 1;

        for &e in graph.vertex(u).adj() {
            let v = graph.edge(e).destination();
            let d = graph.distance(e);
            if !state.is_visited(v) && d < state.key(v) {
                state.set_key(v, d);
                state.set_path(v, Some(e));
                heap.push(QueueEntry { key: d, vertex: v });
            }
        }
    }
    true
}

/// Materializes the geodesically cheapest edge from the tree to an
/// unreached vertex.
fn bridge(graph: &mut Graph, state: &SearchState) -> Option<(VertexIndex, EdgeIndex)> {
    let mut best: Option<(VertexIndex, VertexIndex, f64)> = None;
    for u in (0..graph.num_vertices()).filter(|&u| state.is_visited(u)) {
        for v in state.unvisited() {
            if let Some(d) = graph.geodesic_distance(u, v) {
                if best.map_or(true, |(_, _, b)| d < b) {
                    best = Some((u, v, d));
                }
            }
        }
    }
    let (u, v, _) = best?;
    let e = graph.edge_or_geodesic(u, v)?;
    Some((v, e))
}

/// Preorder walk of the tree stored in `state`'s parent edges, children in
/// vertex order. `None` if the parent edges do not form a spanning tree.
fn preorder(graph: &Graph, state: &SearchState, start: VertexIndex) -> Option<Vec<VertexIndex>> {
    let n = graph.num_vertices();
    let mut children: Vec<Vec<VertexIndex>> = vec![Vec::new(); n];
    let mut tree_edges = 0;
    for v in 0..n {
        if let Some(e) = state.path(v) {
            if v == start {
                return None;
            }
            children[graph.edge(e).origin()].push(v);
            tree_edges += 1;
        }
    }
    if tree_edges + 1 != n {
        return None;
    }

    let mut order = Vec::with_capacity(n);
    let mut seen = vec![false; n];
    let mut stack = vec![start];
    while let Some(u) = stack.pop() {
        if seen[u] {
            return None;
        }
        seen[u] = true;
        order.push(u);
        stack.extend(children[u].iter().rev());
    }
    (order.len() == n).then_some(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn symmetric(n: usize, weights: &[(usize, usize, f64)]) -> Graph {
        let mut g = Graph::new();
        for id in 0..n {
            g.add_vertex(id, "", None).expect("fresh");
        }
        for &(a, b, d) in weights {
            g.add_edge(a, b, d).expect("valid");
            g.add_edge(b, a, d).expect("valid");
        }
        g
    }

    #[test]
    fn test_queue_entry_is_min_heap() {
        let mut heap = BinaryHeap::new();
        for (key, vertex) in [(3.0, 0), (1.0, 1), (2.0, 2), (1.0, 3)] {
            heap.push(QueueEntry { key, vertex });
        }
        let popped: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.vertex)).collect();
        assert_eq!(popped, vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_four_city_preorder() {
        let mut g = symmetric(
            4,
            &[
                (0, 1, 10.0),
                (0, 2, 15.0),
                (0, 3, 20.0),
                (1, 2, 35.0),
                (1, 3, 25.0),
                (2, 3, 30.0),
            ],
        );
        // Tree: 0-1, 0-2, 0-3. Preorder 0, 1, 2, 3.
        let cycle = mst_approximation(&mut g, 0).expect("valid").expect("cycle");
        let order: Vec<usize> = cycle.iter().map(|&e| g.edge(e).origin()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        // 10 + 35 + 30 + 20
        assert!((g.path_distance(&cycle) - 95.0).abs() < 1e-10);
    }

    #[test]
    fn test_line_graph_with_coordinates_is_joined_geodesically() {
        let mut g = Graph::new();
        for id in 0..4 {
            let c = Coordinate::new(0.0, id as f64).expect("valid");
            g.add_vertex(id, "", Some(c)).expect("fresh");
        }
        for (a, b) in [(0, 1), (1, 2), (2, 3)] {
            let d = g.geodesic_distance(a, b).expect("coordinates");
            g.add_edge(a, b, d).expect("valid");
            g.add_edge(b, a, d).expect("valid");
        }
        let cycle = mst_approximation(&mut g, 0).expect("valid").expect("cycle");
        assert_eq!(cycle.len(), 4);
        let closing = g.edge(cycle[3]);
        assert_eq!((closing.origin(), closing.destination()), (3, 0));
        assert!(closing.is_synthesized());
    }

    #[test]
    fn test_disconnected_component_bridged() {
        let mut g = Graph::new();
        for (id, lon) in [0.0, 0.5, 3.0, 3.5].iter().enumerate() {
            let c = Coordinate::new(10.0, *lon).expect("valid");
            g.add_vertex(id, "", Some(c)).expect("fresh");
        }
        for (a, b) in [(0, 1), (2, 3)] {
            let d = g.geodesic_distance(a, b).expect("coordinates");
            g.add_edge(a, b, d).expect("valid");
            g.add_edge(b, a, d).expect("valid");
        }
        let cycle = mst_approximation(&mut g, 0).expect("valid").expect("cycle");
        let order: Vec<usize> = cycle.iter().map(|&e| g.edge(e).origin()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_deterministic_after_bridging() {
        let mut g = Graph::new();
        for (id, lon) in [0.0, 0.5, 3.0, 3.5].iter().enumerate() {
            let c = Coordinate::new(10.0, *lon).expect("valid");
            g.add_vertex(id, "", Some(c)).expect("fresh");
        }
        for (a, b) in [(0, 1), (2, 3)] {
            let d = g.geodesic_distance(a, b).expect("coordinates");
            g.add_edge(a, b, d).expect("valid");
            g.add_edge(b, a, d).expect("valid");
        }
        let recorded = g.num_edges();

        let first = mst_approximation(&mut g, 0).expect("valid").expect("cycle");
        let after_first = g.num_edges();
        assert!(after_first > recorded);

        // The bridge now sits in the adjacency lists.
        let second = mst_approximation(&mut g, 0).expect("valid").expect("cycle");
        assert_eq!(first, second);
        assert_eq!(g.num_edges(), after_first);
        assert!((g.path_distance(&first) - g.path_distance(&second)).abs() < 1e-10);
    }

    #[test]
    fn test_unreachable_without_coordinates() {
        let mut g = symmetric(3, &[(0, 1, 1.0)]);
        assert_eq!(mst_approximation(&mut g, 0).expect("valid"), None);
    }

    #[test]
    fn test_single_vertex() {
        let mut g = symmetric(1, &[]);
        assert_eq!(mst_approximation(&mut g, 0).expect("valid"), None);
    }

    #[test]
    fn test_invalid_start() {
        let mut g = symmetric(2, &[(0, 1, 1.0)]);
        assert!(mst_approximation(&mut g, 5).is_err());
    }
}
