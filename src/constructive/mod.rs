//! Constructive heuristics for building tours in polynomial time.
//!
//! - [`nearest_neighbor`]: greedy walk with geodesic fallback, O(n²)
//! - [`real_world`]: greedy walk over recorded edges only, O(n²)
//! - [`mst_approximation`]: Prim tree + preorder walk, a 2-approximation
//!   under the triangle inequality, O(E log V)

mod mst;
mod nearest_neighbor;

pub use mst::mst_approximation;
pub use nearest_neighbor::{nearest_neighbor, real_world};
