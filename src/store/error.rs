//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur at the persistence seam.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend failure, opaque to this layer.
    #[error("store backend error: {0}")]
    Backend(String),

    /// Unrestricted title selection without a namespace.
    #[error("unrestricted selection without a namespace is not supported")]
    MissingNamespace,

    /// A query condition the backend cannot answer.
    #[error("unsupported query condition: {0}")]
    UnsupportedQuery(String),
}

impl StoreError {
    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
