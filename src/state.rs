//! Per-call traversal state.
//!
//! Solvers never store traversal flags on the graph. Each invocation builds
//! a fresh [`SearchState`] sized to the graph, so nothing leaks from one run
//! into the next and concurrent runs over a shared graph snapshot would not
//! interfere.

use crate::models::{EdgeIndex, VertexIndex};

/// Visited flags, Prim keys, and parent edges indexed by vertex.
#[derive(Debug, Clone)]
pub struct SearchState {
    visited: Vec<bool>,
    key: Vec<f64>,
    path: Vec<Option<EdgeIndex>>,
}

impl SearchState {
    /// Creates a clean state for `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            visited: vec![false; n],
            key: vec![f64::INFINITY; n],
            path: vec![None; n],
        }
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn is_visited(&self, v: VertexIndex) -> bool {
        self.visited[v]
    }

    pub fn set_visited(&mut self, v: VertexIndex, visited: bool) {
        self.visited[v] = visited;
    }

    /// Number of visited vertices.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    /// Unvisited vertices in index order.
    pub fn unvisited(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.visited
            .iter()
            .enumerate()
            .filter_map(|(i, &visited)| (!visited).then_some(i))
    }

    pub fn key(&self, v: VertexIndex) -> f64 {
        self.key[v]
    }

    pub fn set_key(&mut self, v: VertexIndex, key: f64) {
        self.key[v] = key;
    }

    /// Parent edge recorded for `v`.
    pub fn path(&self, v: VertexIndex) -> Option<EdgeIndex> {
        self.path[v]
    }

    pub fn set_path(&mut self, v: VertexIndex, edge: Option<EdgeIndex>) {
        self.path[v] = edge;
    }
}
