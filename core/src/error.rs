use thiserror::Error;

use crate::graph::Vertex;

/// Errors raised by the graph engine.
///
/// Most invalid inputs are silent no-ops (duplicate edges, inactive
/// endpoints, unroutable pairs). Only contract violations surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GraphError {
    #[error("vertex {vertex} out of range (vertex count {len})")]
    VertexOutOfRange { vertex: Vertex, len: usize },

    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// Check that `v` is a valid handle for storage of length `len`.
pub(crate) fn check_vertex(v: Vertex, len: usize) -> Result<()> {
    if v < len {
        Ok(())
    } else {
        Err(GraphError::VertexOutOfRange { vertex: v, len })
    }
}
