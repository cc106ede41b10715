//! Tour validation.
//!
//! Checks that a tour is a closed Hamiltonian cycle over the graph and that
//! its reported distance matches the sum of its edges.

mod validator;

pub use validator::{TourValidator, TourViolation};
