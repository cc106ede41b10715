//! Local search for improving complete tours.
//!
//! - [`lin_kernighan`]: random initial tour improved by variable-depth
//!   edge exchange
//! - [`lin_kernighan_improve`]: the same improvement on a caller-supplied
//!   tour, e.g. one built by a constructive heuristic

mod lin_kernighan;

pub use lin_kernighan::{lin_kernighan, lin_kernighan_improve};
