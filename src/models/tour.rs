//! Tour and solver result types.

use serde::{Deserialize, Serialize};

use super::{EdgeIndex, Graph};

/// One leg of a tour, recorded by external vertex ids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TourEdge {
    /// Id of the vertex the leg leaves.
    pub origin: usize,
    /// Id of the vertex the leg reaches.
    pub destination: usize,
    /// Leg distance.
    pub distance: f64,
}

/// An ordered edge sequence forming a closed Hamiltonian cycle.
///
/// A tour over `n >= 2` vertices holds exactly `n` edges; the last one
/// returns to the start vertex. An empty tour means no cycle was found.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Graph, Tour};
///
/// let mut g = Graph::new();
/// g.add_vertex(0, "A", None).unwrap();
/// g.add_vertex(1, "B", None).unwrap();
/// let ab = g.add_edge(0, 1, 3.0).unwrap();
/// let ba = g.add_edge(1, 0, 3.0).unwrap();
///
/// let tour = Tour::from_edges(&g, &[ab, ba]);
/// assert_eq!(tour.len(), 2);
/// assert_eq!(tour.vertex_ids(), vec![0, 1]);
/// assert!(tour.is_closed());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    edges: Vec<TourEdge>,
}

impl Tour {
    /// Creates an empty tour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the given graph edges into an owned tour.
    pub fn from_edges(graph: &Graph, edges: &[EdgeIndex]) -> Self {
        let edges = edges
            .iter()
            .map(|&e| {
                let edge = graph.edge(e);
                TourEdge {
                    origin: graph.vertex(edge.origin()).id(),
                    destination: graph.vertex(edge.destination()).id(),
                    distance: edge.distance(),
                }
            })
            .collect();
        Self { edges }
    }

    /// Legs in travel order.
    pub fn edges(&self) -> &[TourEdge] {
        &self.edges
    }

    /// Number of legs.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Id of the first vertex.
    pub fn start(&self) -> Option<usize> {
        self.edges.first().map(|e| e.origin)
    }

    /// Vertex ids in visiting order, start first, without repeating it.
    pub fn vertex_ids(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.origin).collect()
    }

    /// Sum of leg distances.
    pub fn total_distance(&self) -> f64 {
        self.edges.iter().map(|e| e.distance).sum()
    }

    /// `true` if legs chain end to start and the last leg returns to the
    /// first vertex.
    pub fn is_closed(&self) -> bool {
        match (self.edges.first(), self.edges.last()) {
            (Some(first), Some(last)) => {
                last.destination == first.origin
                    && self
                        .edges
                        .windows(2)
                        .all(|w| w[0].destination == w[1].origin)
            }
            _ => false,
        }
    }
}

/// Elapsed wall-clock and process CPU time, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElapsedTime {
    pub real: f64,
    pub cpu: f64,
}

/// The outcome of one solver invocation.
///
/// An empty tour signals that no Hamiltonian cycle was found; its distance
/// is reported as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourResult {
    tour: Tour,
    distance: f64,
    time: ElapsedTime,
}

impl TourResult {
    pub fn new(tour: Tour, distance: f64, time: ElapsedTime) -> Self {
        Self {
            tour,
            distance,
            time,
        }
    }

    /// A result carrying no tour.
    pub fn no_solution(time: ElapsedTime) -> Self {
        Self::new(Tour::new(), 0.0, time)
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Total tour distance.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn time(&self) -> ElapsedTime {
        self.time
    }

    /// `true` if a tour was found.
    pub fn is_solution(&self) -> bool {
        !self.tour.is_empty()
    }
}
