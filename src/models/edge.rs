//! Directed edge type.

/// Index of a vertex in the graph's arena.
pub type VertexIndex = usize;

/// Index of an edge in the graph's arena.
pub type EdgeIndex = usize;

/// A directed edge `origin -> destination` with a non-negative distance.
///
/// Endpoints are arena indices, not vertex ids. A symmetric connection is
/// modeled as two opposing edges linked through [`Edge::reverse`].
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    origin: VertexIndex,
    destination: VertexIndex,
    distance: f64,
    reverse: Option<EdgeIndex>,
    synthesized: bool,
}

impl Edge {
    pub(crate) fn new(
        origin: VertexIndex,
        destination: VertexIndex,
        distance: f64,
        synthesized: bool,
    ) -> Self {
        Self {
            origin,
            destination,
            distance,
            reverse: None,
            synthesized,
        }
    }

    /// Arena index of the origin vertex.
    pub fn origin(&self) -> VertexIndex {
        self.origin
    }

    /// Arena index of the destination vertex.
    pub fn destination(&self) -> VertexIndex {
        self.destination
    }

    /// Edge weight.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The opposing edge `destination -> origin`, if present.
    pub fn reverse(&self) -> Option<EdgeIndex> {
        self.reverse
    }

    /// `true` if the edge was materialized from geodesic distance during a
    /// search rather than loaded with the graph.
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    pub(crate) fn set_reverse(&mut self, reverse: EdgeIndex) {
        self.reverse = Some(reverse);
    }
}
