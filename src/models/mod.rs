//! Graph model types for traveling salesman problems.
//!
//! Provides the core abstractions: coordinate-bearing vertices, directed
//! weighted edges, the graph arena that owns both, and the tour and result
//! types every solver returns.

mod coordinate;
mod edge;
mod graph;
mod tour;
mod vertex;

pub use coordinate::Coordinate;
pub use edge::{Edge, EdgeIndex, VertexIndex};
pub use graph::{Graph, SYMMETRY_TOLERANCE};
pub use tour::{ElapsedTime, Tour, TourEdge, TourResult};
pub use vertex::Vertex;
