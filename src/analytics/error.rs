//! Analytics error taxonomy.
//!
//! Every failure an operation can report, kept distinct so callers (and the
//! two serving surfaces) can render each kind appropriately. All variants
//! are recoverable at the request boundary: a failed request never corrupts
//! the graph cache or affects later requests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The record store or graph build failed; data is not available.
    #[error("Failed to load graph data: {0}")]
    DataUnavailable(String),

    /// A request argument failed validation (unknown enum value, missing
    /// required argument, malformed date).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced entity id is not a node of the selected graph.
    #[error("Invalid source or target ID. Please check the entity IDs.")]
    NotFound,

    /// Both endpoints are valid but no connecting path exists.
    #[error("No path found between the specified entities.")]
    NoPath,

    /// The selected algorithm could not produce a result for this graph
    /// (e.g. eigenvector centrality failed to converge).
    #[error("{0} failed: {1}")]
    AlgorithmFailure(&'static str, String),
}

impl AnalyticsError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AnalyticsError::NoPath.to_string(),
            "No path found between the specified entities."
        );
        assert_eq!(
            AnalyticsError::NotFound.to_string(),
            "Invalid source or target ID. Please check the entity IDs."
        );
        assert_eq!(
            AnalyticsError::AlgorithmFailure("Centrality analysis", "no convergence".into())
                .to_string(),
            "Centrality analysis failed: no convergence"
        );
    }
}
