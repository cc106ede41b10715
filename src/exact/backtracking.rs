//! Exhaustive backtracking search.
//!
//! # Algorithm
//!
//! Depth-first enumeration of every simple path leaving the start vertex.
//! Once all vertices are placed, the path is closed back to the start and
//! compared against the best cycle so far; only a strictly shorter cycle
//! replaces it, so ties keep the first one found.
//!
//! On an incomplete graph the search also walks edges that do not exist yet:
//! whenever both endpoints carry coordinates, the missing edge is
//! materialized from geodesic distance and kept in the graph for later
//! branches.
//!
//! # Complexity
//!
//! O((n-1)!) time, O(n) recursion depth. Practical up to about 15 vertices.

use log::debug;

use crate::error::Result;
use crate::models::{EdgeIndex, Graph, VertexIndex};
use crate::state::SearchState;

/// Finds a minimum-cost Hamiltonian cycle by exhaustive backtracking.
///
/// Returns the cycle as `n` edge indices starting at `start`, or `None` if
/// no cycle exists (even with geodesic edges).
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
/// use u_tsp::exact::backtracking;
///
/// let mut g = Graph::new();
/// for id in 0..3 {
///     g.add_vertex(id, "", None).unwrap();
/// }
/// for (a, b, d) in [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)] {
///     g.add_edge(a, b, d).unwrap();
///     g.add_edge(b, a, d).unwrap();
/// }
///
/// let cycle = backtracking(&mut g, 0).unwrap().expect("triangle has a cycle");
/// assert_eq!(cycle.len(), 3);
/// assert!((g.path_distance(&cycle) - 6.0).abs() < 1e-10);
/// ```
pub fn backtracking(graph: &mut Graph, start: VertexIndex) -> Result<Option<Vec<EdgeIndex>>> {
    graph.check_vertex(start)?;
    let n = graph.num_vertices();
    let complete = graph.is_complete();

    let mut search = Backtracking {
        graph,
        start,
        n,
        complete,
        state: SearchState::new(n),
        path: Vec::with_capacity(n),
        best: None,
        best_distance: f64::INFINITY,
        closed_cycles: 0,
    };
    search.state.set_visited(start, true);
    search.visit(start, 0.0);

    debug!(
        "backtracking: {} closed cycles, best {:?}",
        search.closed_cycles,
        search.best.as_ref().map(|_| search.best_distance)
    );
    Ok(search.best)
}

struct Backtracking<'g> {
    graph: &'g mut Graph,
    start: VertexIndex,
    n: usize,
    complete: bool,
    state: SearchState,
    path: Vec<EdgeIndex>,
    best: Option<Vec<EdgeIndex>>,
    best_distance: f64,
    closed_cycles: u64,
}

impl Backtracking<'_> {
    fn visit(&mut self, current: VertexIndex, distance: f64) {
        if self.path.len() + 1 == self.n {
            self.close(current, distance);
            return;
        }

        for edge in self.candidates(current) {
            let next = self.graph.edge(edge).destination();
            let weight = self.graph.distance(edge);

            self.state.set_visited(next, true);
            self.path.push(edge);

            self.visit(next, distance + weight);

            self.path.pop();
            self.state.set_visited(next, false);
        }
    }

    /// Edges from `current` to unvisited vertices, geodesic ones included
    /// when the graph is incomplete.
    fn candidates(&mut self, current: VertexIndex) -> Vec<EdgeIndex> {
        let graph = &*self.graph;
        let state = &self.state;
        let mut edges: Vec<EdgeIndex> = graph
            .vertex(current)
            .adj()
            .iter()
            .copied()
            .filter(|&e| !state.is_visited(graph.edge(e).destination()))
            .collect();

        if !self.complete && graph.vertex(current).has_coordinates() {
            let unreached: Vec<VertexIndex> = state
                .unvisited()
                .filter(|&v| graph.find_edge(current, v).is_none())
                .collect();
            for v in unreached {
                if let Some(e) = self.graph.edge_or_geodesic(current, v) {
                    edges.push(e);
                }
            }
        }
        edges
    }

    fn close(&mut self, current: VertexIndex, distance: f64) {
        let closing = if self.complete {
            self.graph.find_edge(current, self.start)
        } else {
            self.graph.edge_or_geodesic(current, self.start)
        };
        let Some(edge) = closing else {
            return;
        };

        self.closed_cycles += 1;
        let total = distance + self.graph.distance(edge);
        if total < self.best_distance {
            self.best_distance = total;
            let mut cycle = self.path.clone();
            cycle.push(edge);
            self.best = Some(cycle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    /// A-B=10, A-C=15, A-D=20, B-C=35, B-D=25, C-D=30.
    fn four_city_graph() -> Graph {
        let mut g = Graph::new();
        for (id, label) in ["A", "B", "C", "D"].iter().enumerate() {
            g.add_vertex(id, *label, None).expect("fresh");
        }
        for (a, b, d) in [
            (0, 1, 10.0),
            (0, 2, 15.0),
            (0, 3, 20.0),
            (1, 2, 35.0),
            (1, 3, 25.0),
            (2, 3, 30.0),
        ] {
            g.add_edge(a, b, d).expect("valid");
            g.add_edge(b, a, d).expect("valid");
        }
        g
    }

    #[test]
    fn test_four_city_optimum() {
        let mut g = four_city_graph();
        let cycle = backtracking(&mut g, 0).expect("valid start").expect("cycle");
        assert_eq!(cycle.len(), 4);
        assert!((g.path_distance(&cycle) - 80.0).abs() < 1e-10);
        assert_eq!(g.edge(cycle[0]).origin(), 0);
        assert_eq!(g.edge(cycle[3]).destination(), 0);
    }

    #[test]
    fn test_other_start_same_optimum() {
        let mut g = four_city_graph();
        let cycle = backtracking(&mut g, 2).expect("valid start").expect("cycle");
        assert!((g.path_distance(&cycle) - 80.0).abs() < 1e-10);
        assert_eq!(g.edge(cycle[0]).origin(), 2);
    }

    #[test]
    fn test_deterministic() {
        let mut g = four_city_graph();
        let first = backtracking(&mut g, 0).expect("valid start");
        let second = backtracking(&mut g, 0).expect("valid start");
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_start() {
        let mut g = four_city_graph();
        assert!(backtracking(&mut g, 9).is_err());
    }

    #[test]
    fn test_single_vertex_has_no_cycle() {
        let mut g = Graph::new();
        g.add_vertex(0, "", None).expect("fresh");
        assert_eq!(backtracking(&mut g, 0).expect("valid start"), None);
    }

    #[test]
    fn test_path_graph_without_coordinates_has_no_cycle() {
        let mut g = Graph::new();
        for id in 0..3 {
            g.add_vertex(id, "", None).expect("fresh");
        }
        for (a, b) in [(0, 1), (1, 2)] {
            g.add_edge(a, b, 1.0).expect("valid");
            g.add_edge(b, a, 1.0).expect("valid");
        }
        assert_eq!(backtracking(&mut g, 0).expect("valid start"), None);
        assert_eq!(g.num_edges(), 4, "nothing synthesized without coordinates");
    }

    #[test]
    fn test_synthesizes_missing_edges_from_coordinates() {
        let mut g = Graph::new();
        let coords = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
        for (id, (lat, lon)) in coords.iter().enumerate() {
            let c = Coordinate::new(*lat, *lon).expect("valid");
            g.add_vertex(id, "", Some(c)).expect("fresh");
        }
        // Only a path 0-1-2-3; the closing edge 3-0 must come from geodesy.
        for (a, b) in [(0, 1), (1, 2), (2, 3)] {
            let d = g.geodesic_distance(a, b).expect("coordinates");
            g.add_edge(a, b, d).expect("valid");
            g.add_edge(b, a, d).expect("valid");
        }

        let cycle = backtracking(&mut g, 0).expect("valid start").expect("cycle");
        assert_eq!(cycle.len(), 4);
        assert!(cycle.iter().any(|&e| g.edge(e).is_synthesized()));
        let last = g.edge(cycle[3]);
        assert_eq!(last.destination(), 0);
    }
}
