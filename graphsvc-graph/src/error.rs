//! Errors surfaced by graph-store clients.

use thiserror::Error;

/// Alias for Results returning [`GraphError`].
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("edge not found: {0}")]
    EdgeNotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("driver error: {0}")]
    Driver(String),
}

impl GraphError {
    /// True for the lookup failures a caller can map to "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound(_) | Self::EdgeNotFound(_))
    }
}
