//! Exact solvers.
//!
//! All three return the optimal cycle as edge indices leaving `start`, or
//! `None` when no Hamiltonian cycle exists.
//!
//! - [`backtracking`]: exhaustive search, synthesizes geodesic edges on
//!   incomplete graphs
//! - [`branch_and_bound`]: exhaustive search with cost pruning
//! - [`held_karp`]: bitmask dynamic programming for up to 24 vertices

mod backtracking;
mod branch_bound;
mod held_karp;

pub use backtracking::backtracking;
pub use branch_bound::branch_and_bound;
pub use held_karp::{
    held_karp, held_karp_table_bytes, HELD_KARP_TABLE_BUDGET, HELD_KARP_VERTEX_CEILING,
};
