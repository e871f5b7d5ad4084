//! Unified error types for the raceway ecosystem.
//!
//! [`CoreError`] is the common representation used at API boundaries;
//! domain-specific errors convert into it for uniform handling.

use thiserror::Error;

/// Errors raised while building a routing graph.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("vertex {vertex} out of range (graph has {count} vertices)")]
    VertexOutOfRange { vertex: usize, count: usize },

    #[error("self-loop on vertex {vertex} is not an admissible segment")]
    SelfLoop { vertex: usize },

    #[error("negative segment weight {weight}")]
    NegativeWeight { weight: f64 },
}

/// Unified error type for raceway operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias for Results using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;

impl From<anyhow::Error> for CoreError {
    fn from(err: anyhow::Error) -> Self {
        CoreError::Other(err.to_string())
    }
}

impl From<String> for CoreError {
    fn from(s: String) -> Self {
        CoreError::Other(s)
    }
}

impl From<&str> for CoreError {
    fn from(s: &str) -> Self {
        CoreError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_display() {
        let err = GraphError::VertexOutOfRange { vertex: 4, count: 3 };
        assert!(err.to_string().contains("vertex 4"));
    }

    #[test]
    fn test_conversion_to_core_error() {
        let err: CoreError = GraphError::SelfLoop { vertex: 1 }.into();
        assert!(matches!(err, CoreError::Graph(_)));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> CoreResult<()> {
            Err("boom".into())
        }
        fn outer() -> CoreResult<()> {
            inner()?;
            Ok(())
        }
        assert!(outer().is_err());
    }
}
