//! Vertex lookup by external id.
//!
//! Provides an open-addressing hash table resolving dataset ids to arena
//! indices in O(1) amortized time.

mod table;

pub use table::VertexTable;
