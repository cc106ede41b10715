//! Error type shared by the graph model, the solvers, and ingestion.
//!
//! "No tour exists" is not an error: solvers report it as an empty
//! [`TourResult`](crate::models::TourResult).

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// The lookup table has no vertex with this id.
    #[error("vertex {0} not found")]
    VertexNotFound(usize),

    /// An arena index that does not refer to a vertex or edge.
    #[error("null reference: {0}")]
    NullReference(String),

    /// Algorithm or model preconditions violated.
    #[error("semantic error: {0}")]
    Semantic(String),

    #[error("duplicate vertex id {0}")]
    DuplicateVertex(usize),

    #[error("duplicate edge {origin} -> {destination}")]
    DuplicateEdge { origin: usize, destination: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn semantic(message: impl Into<String>) -> Self {
        Self::Semantic(message.into())
    }

    pub fn null_reference(message: impl Into<String>) -> Self {
        Self::NullReference(message.into())
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
