//! Nearest-neighbor constructive heuristics.
//!
//! Both walks start at the given vertex and always leave through the
//! cheapest edge to an unvisited vertex, then close back to the start.
//! They differ only in what happens when the graph runs out of edges:
//!
//! - [`nearest_neighbor`] falls back to geodesic distance and materializes
//!   the missing edge, as long as coordinates are available.
//! - [`real_world`] uses recorded edges only and gives up instead.
//!
//! # Complexity
//!
//! O(n²) on a complete graph, O(n · (n + deg)) with geodesic fallback.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An analysis of
//! several heuristics for the traveling salesman problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use log::debug;

use crate::error::Result;
use crate::models::{EdgeIndex, Graph, VertexIndex};
use crate::state::SearchState;

/// Builds a tour greedily, synthesizing geodesic edges where needed.
///
/// Returns `None` when the walk gets stuck at a vertex with neither an edge
/// to an unvisited vertex nor coordinates to compute one.
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
/// use u_tsp::constructive::nearest_neighbor;
///
/// let mut g = Graph::new();
/// for id in 0..4 {
///     g.add_vertex(id, "", None).unwrap();
/// }
/// for (a, b, d) in [(0, 1, 1.0), (0, 2, 2.0), (0, 3, 1.0),
///                   (1, 2, 1.0), (1, 3, 2.0), (2, 3, 1.0)] {
///     g.add_edge(a, b, d).unwrap();
///     g.add_edge(b, a, d).unwrap();
/// }
///
/// let cycle = nearest_neighbor(&mut g, 0).unwrap().unwrap();
/// // 0 -> 1 -> 2 -> 3 -> 0
/// assert!((g.path_distance(&cycle) - 4.0).abs() < 1e-10);
/// ```
pub fn nearest_neighbor(graph: &mut Graph, start: VertexIndex) -> Result<Option<Vec<EdgeIndex>>> {
    graph.check_vertex(start)?;
    let n = graph.num_vertices();
    let mut state = SearchState::new(n);
    let mut cycle = Vec::with_capacity(n);

    state.set_visited(start, true);
    let mut current = start;
    for _ in 1..n {
        let step = match cheapest_unvisited(graph, &state, current) {
            Some(e) => Some(e),
            None => nearest_geodesic(graph, &state, current),
        };
        let Some(edge) = step else {
            debug!("nearest-neighbor: stuck at vertex {}", graph.vertex(current).id());
            return Ok(None);
        };
        current = graph.edge(edge).destination();
        state.set_visited(current, true);
        cycle.push(edge);
    }

    match graph.edge_or_geodesic(current, start) {
        Some(edge) => {
            cycle.push(edge);
            Ok(Some(cycle))
        }
        None => Ok(None),
    }
}

/// Builds a tour greedily over recorded edges only.
///
/// Returns `None` as soon as the walk cannot continue or cannot close.
///
/// # Errors
///
/// [`Error::NullReference`](crate::Error::NullReference) if `start` is not a
/// vertex of `graph`.
pub fn real_world(graph: &Graph, start: VertexIndex) -> Result<Option<Vec<EdgeIndex>>> {
    graph.check_vertex(start)?;
    let n = graph.num_vertices();
    let mut state = SearchState::new(n);
    let mut cycle = Vec::with_capacity(n);

    state.set_visited(start, true);
    let mut current = start;
    for _ in 1..n {
        let Some(edge) = cheapest_unvisited(graph, &state, current) else {
            debug!("real-world: no edge out of vertex {}", graph.vertex(current).id());
            return Ok(None);
        };
        current = graph.edge(edge).destination();
        state.set_visited(current, true);
        cycle.push(edge);
    }

    Ok(graph.find_edge(current, start).map(|edge| {
        cycle.push(edge);
        cycle
    }))
}

/// Cheapest recorded edge from `current` to an unvisited vertex. Ties keep
/// the first edge in adjacency order.
fn cheapest_unvisited(
    graph: &Graph,
    state: &SearchState,
    current: VertexIndex,
) -> Option<EdgeIndex> {
    let mut best: Option<(EdgeIndex, f64)> = None;
    for &e in graph.vertex(current).adj() {
        if state.is_visited(graph.edge(e).destination()) {
            continue;
        }
        let d = graph.distance(e);
        if best.map_or(true, |(_, b)| d < b) {
            best = Some((e, d));
        }
    }
    best.map(|(e, _)| e)
}

/// Materializes the geodesically closest edge from `current` to an
/// unvisited vertex.
fn nearest_geodesic(
    graph: &mut Graph,
    state: &SearchState,
    current: VertexIndex,
) -> Option<EdgeIndex> {
    let mut best: Option<(VertexIndex, f64)> = None;
    for v in state.unvisited() {
        if let Some(d) = graph.geodesic_distance(current, v) {
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((v, d));
            }
        }
    }
    let (v, _) = best?;
    graph.edge_or_geodesic(current, v)
}
