//! Branch-and-bound search.
//!
//! Same depth-first shape as [`backtracking`](super::backtracking), but a
//! branch is cut as soon as its partial cost reaches the best complete cycle.
//! Edge weights are non-negative, so no completion of a cut branch could be
//! strictly better. Only edges already in the graph are considered.

use log::debug;

use crate::error::Result;
use crate::models::{EdgeIndex, Graph, VertexIndex};
use crate::state::SearchState;

/// Finds a minimum-cost Hamiltonian cycle using existing edges only.
///
/// Returns `None` if the graph has no Hamiltonian cycle through `start`.
///
/// # Errors
///
/// [`Error::NullReference`](crate::Error::NullReference) if `start` is not a
/// vertex of `graph`.
pub fn branch_and_bound(graph: &Graph, start: VertexIndex) -> Result<Option<Vec<EdgeIndex>>> {
    graph.check_vertex(start)?;
    let n = graph.num_vertices();

    let mut search = BranchAndBound {
        graph,
        start,
        n,
        state: SearchState::new(n),
        path: Vec::with_capacity(n),
        best: None,
        best_distance: f64::INFINITY,
        pruned: 0,
    };
    search.state.set_visited(start, true);
    search.visit(start, 0.0);

    debug!(
        "branch-and-bound: pruned {} branches, best {:?}",
        search.pruned,
        search.best.as_ref().map(|_| search.best_distance)
    );
    Ok(search.best)
}

struct BranchAndBound<'g> {
    graph: &'g Graph,
    start: VertexIndex,
    n: usize,
    state: SearchState,
    path: Vec<EdgeIndex>,
    best: Option<Vec<EdgeIndex>>,
    best_distance: f64,
    pruned: u64,
}

impl BranchAndBound<'_> {
    fn visit(&mut self, current: VertexIndex, distance: f64) {
        if self.path.len() + 1 == self.n {
            if let Some(edge) = self.graph.find_edge(current, self.start) {
                let total = distance + self.graph.distance(edge);
                if total < self.best_distance {
                    self.best_distance = total;
                    let mut cycle = self.path.clone();
                    cycle.push(edge);
                    self.best = Some(cycle);
                }
            }
            return;
        }

        let graph = self.graph;
        for &edge in graph.vertex(current).adj() {
            let next = graph.edge(edge).destination();
            if self.state.is_visited(next) {
                continue;
            }
            let reached = distance + graph.distance(edge);
            if reached >= self.best_distance {
                self.pruned += 1;
                continue;
            }

            self.state.set_visited(next, true);
            self.path.push(edge);

            self.visit(next, reached);

            self.path.pop();
            self.state.set_visited(next, false);
        }
    }
}
