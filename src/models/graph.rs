//! Directed weighted graph stored as vertex and edge arenas.

use log::debug;

use super::{Coordinate, Edge, EdgeIndex, Vertex, VertexIndex};
use crate::distance::haversine;
use crate::error::{Error, Result};
use crate::lookup::VertexTable;

/// Tolerance used when comparing opposing edge weights.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A directed graph with non-negative edge weights.
///
/// Vertices and edges live in append-only arenas, so indices stay valid for
/// the lifetime of the graph even while a search materializes new edges.
/// The graph owns the [`VertexTable`] that resolves external ids, keeping the
/// two consistent by construction.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Graph;
///
/// let mut g = Graph::new();
/// let a = g.add_vertex(0, "A", None).unwrap();
/// let b = g.add_vertex(1, "B", None).unwrap();
/// g.add_edge(a, b, 10.0).unwrap();
/// g.add_edge(b, a, 10.0).unwrap();
///
/// assert_eq!(g.num_vertices(), 2);
/// assert!(g.is_complete());
/// assert!(g.is_symmetric());
/// assert_eq!(g.resolve(1), Some(b));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    table: VertexTable,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph sized for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::new(),
            table: VertexTable::with_capacity(vertices),
        }
    }

    /// Adds a vertex and registers it in the lookup table.
    pub fn add_vertex(
        &mut self,
        id: usize,
        label: impl Into<String>,
        coordinates: Option<Coordinate>,
    ) -> Result<VertexIndex> {
        if self.table.contains(id) {
            return Err(Error::DuplicateVertex(id));
        }
        let index = self.vertices.len();
        self.vertices.push(Vertex::new(id, label, coordinates));
        self.table.insert(id, index);
        Ok(index)
    }

    /// Adds the directed edge `origin -> destination`.
    ///
    /// Rejects unknown indices, self-loops, negative or non-finite distances,
    /// and a second edge between the same ordered pair.
    pub fn add_edge(
        &mut self,
        origin: VertexIndex,
        destination: VertexIndex,
        distance: f64,
    ) -> Result<EdgeIndex> {
        self.insert_edge(origin, destination, distance, false)
    }

    /// Adds an edge between two vertices given by their external ids.
    pub fn add_edge_by_id(
        &mut self,
        origin_id: usize,
        destination_id: usize,
        distance: f64,
    ) -> Result<EdgeIndex> {
        let origin = self.resolve_or_err(origin_id)?;
        let destination = self.resolve_or_err(destination_id)?;
        self.add_edge(origin, destination, distance)
    }

    fn insert_edge(
        &mut self,
        origin: VertexIndex,
        destination: VertexIndex,
        distance: f64,
        synthesized: bool,
    ) -> Result<EdgeIndex> {
        let n = self.vertices.len();
        if origin >= n || destination >= n {
            return Err(Error::null_reference(format!(
                "edge endpoint out of range: {origin} -> {destination} (graph has {n} vertices)"
            )));
        }
        if origin == destination {
            return Err(Error::semantic(format!(
                "self-loop on vertex {}",
                self.vertices[origin].id()
            )));
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(Error::semantic(format!(
                "edge distance must be finite and non-negative, got {distance}"
            )));
        }
        if self.find_edge(origin, destination).is_some() {
            return Err(Error::DuplicateEdge {
                origin: self.vertices[origin].id(),
                destination: self.vertices[destination].id(),
            });
        }

        let index = self.edges.len();
        self.edges.push(Edge::new(origin, destination, distance, synthesized));
        self.vertices[origin].push_outgoing(index);
        self.vertices[destination].push_incoming(index);

        if let Some(reverse) = self.find_edge(destination, origin) {
            self.edges[index].set_reverse(reverse);
            self.edges[reverse].set_reverse(index);
        }
        Ok(index)
    }

    /// Returns the edge `origin -> destination`, if present.
    pub fn find_edge(&self, origin: VertexIndex, destination: VertexIndex) -> Option<EdgeIndex> {
        self.vertices
            .get(origin)?
            .adj()
            .iter()
            .copied()
            .find(|&e| self.edges[e].destination() == destination)
    }

    /// Geodesic distance between two vertices, if both carry coordinates.
    pub fn geodesic_distance(&self, a: VertexIndex, b: VertexIndex) -> Option<f64> {
        let ca = self.vertices.get(a)?.coordinates()?;
        let cb = self.vertices.get(b)?.coordinates()?;
        Some(haversine(ca, cb))
    }

    /// Returns the edge `origin -> destination`, materializing it from
    /// geodesic distance when it is missing and both endpoints have
    /// coordinates. `None` means no edge exists and none can be made.
    pub fn edge_or_geodesic(
        &mut self,
        origin: VertexIndex,
        destination: VertexIndex,
    ) -> Option<EdgeIndex> {
        if let Some(e) = self.find_edge(origin, destination) {
            return Some(e);
        }
        let distance = self.geodesic_distance(origin, destination)?;
        match self.insert_edge(origin, destination, distance, true) {
            Ok(e) => {
                debug!(
                    "synthesized edge {} -> {} ({distance:.3})",
                    self.vertices[origin].id(),
                    self.vertices[destination].id()
                );
                Some(e)
            }
            Err(_) => None,
        }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges, synthesized ones included.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the vertex at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self.vertices[index]
    }

    /// Returns the edge at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn edge(&self, index: EdgeIndex) -> &Edge {
        &self.edges[index]
    }

    /// Distance of the edge at `index`.
    pub fn distance(&self, index: EdgeIndex) -> f64 {
        self.edges[index].distance()
    }

    /// Fails with [`Error::NullReference`] if `index` is not a vertex.
    pub fn check_vertex(&self, index: VertexIndex) -> Result<()> {
        if index < self.vertices.len() {
            Ok(())
        } else {
            Err(Error::null_reference(format!(
                "vertex index {index} out of range (graph has {} vertices)",
                self.vertices.len()
            )))
        }
    }

    /// The id lookup table.
    pub fn table(&self) -> &VertexTable {
        &self.table
    }

    /// Resolves an external id to an arena index.
    pub fn resolve(&self, id: usize) -> Option<VertexIndex> {
        self.table.resolve(id)
    }

    /// Resolves an external id, failing with [`Error::VertexNotFound`].
    pub fn resolve_or_err(&self, id: usize) -> Result<VertexIndex> {
        self.table.resolve(id).ok_or(Error::VertexNotFound(id))
    }

    /// `true` if every vertex has an outgoing edge to every other vertex.
    pub fn is_complete(&self) -> bool {
        let expected = self.vertices.len().saturating_sub(1);
        self.vertices.iter().all(|v| v.out_degree() == expected)
    }

    /// `true` if every edge has a reverse edge of equal distance.
    pub fn is_symmetric(&self) -> bool {
        self.edges.iter().all(|e| match e.reverse() {
            Some(r) => (e.distance() - self.edges[r].distance()).abs() <= SYMMETRY_TOLERANCE,
            None => false,
        })
    }

    /// Sum of the distances of the given edges.
    pub fn path_distance(&self, edges: &[EdgeIndex]) -> f64 {
        edges.iter().map(|&e| self.edges[e].distance()).sum()
    }
}
