//! Solver facade.
//!
//! [`TspSolver`] owns a graph and runs any [`Algorithm`] on it from a start
//! vertex id, returning a timed [`TourResult`](crate::models::TourResult).

mod algorithm;
mod config;
mod runner;
mod timer;

pub use algorithm::Algorithm;
pub use config::SolverConfig;
pub use runner::TspSolver;
pub use timer::Stopwatch;
