//! Dataset ingestion.
//!
//! Two layouts are supported:
//!
//! - a single edge list, where vertices appear implicitly and carry no
//!   coordinates ([`parse_edge_list`]);
//! - a node file with coordinates ([`parse_nodes`]) optionally followed by
//!   an edge file over those ids ([`parse_edges_into`]).
//!
//! Each `parse_*` function has a `load_*` counterpart reading from a path.

mod parser;

pub use parser::{
    load_edge_list, load_edges_into, load_nodes, parse_edge_list, parse_edges_into, parse_nodes,
};
