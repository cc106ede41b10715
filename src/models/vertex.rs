//! Vertex type.

use super::{Coordinate, EdgeIndex};

/// A location in the graph.
///
/// Holds identity, a display label, optional coordinates, and the outgoing
/// and incoming adjacency lists as edge indices. Traversal state (visited
/// flags, Prim keys, parent edges) lives in
/// [`SearchState`](crate::state::SearchState), never here.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Coordinate, Vertex};
///
/// let v = Vertex::new(4, "", None);
/// assert_eq!(v.label(), "4");
/// assert!(!v.has_coordinates());
///
/// let c = Coordinate::new(38.7, -9.1).unwrap();
/// let w = Vertex::new(5, "Lisbon", Some(c));
/// assert_eq!(w.label(), "Lisbon");
/// ```
#[derive(Debug, Clone)]
pub struct Vertex {
    id: usize,
    label: String,
    coordinates: Option<Coordinate>,
    adj: Vec<EdgeIndex>,
    incoming: Vec<EdgeIndex>,
}

impl Vertex {
    /// Creates a vertex. An empty label falls back to the id.
    pub fn new(id: usize, label: impl Into<String>, coordinates: Option<Coordinate>) -> Self {
        let mut label = label.into();
        if label.is_empty() {
            label = id.to_string();
        }
        Self {
            id,
            label,
            coordinates,
            adj: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// External identifier (as loaded from the dataset).
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn coordinates(&self) -> Option<&Coordinate> {
        self.coordinates.as_ref()
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates.is_some()
    }

    /// Outgoing edges in insertion order.
    pub fn adj(&self) -> &[EdgeIndex] {
        &self.adj
    }

    /// Incoming edges in insertion order.
    pub fn incoming(&self) -> &[EdgeIndex] {
        &self.incoming
    }

    pub fn out_degree(&self) -> usize {
        self.adj.len()
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    pub(crate) fn push_outgoing(&mut self, edge: EdgeIndex) {
        self.adj.push(edge);
    }

    pub(crate) fn push_incoming(&mut self, edge: EdgeIndex) {
        self.incoming.push(edge);
    }
}
