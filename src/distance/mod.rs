//! Distance oracles.
//!
//! Provides the haversine great-circle distance used to materialize missing
//! edges, and a dense distance matrix snapshot of a graph's explicit edges.

mod haversine;
mod matrix;

pub use haversine::{haversine, EARTH_RADIUS_METERS};
pub use matrix::DistanceMatrix;
