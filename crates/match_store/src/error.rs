//! Match store error types.

use thiserror::Error;

/// Errors raised while setting up the candidate generator.
///
/// Store operations themselves never fail; unknown identifiers are no-ops.
#[derive(Debug, Error)]
pub enum MatchStoreError {
    /// A reference catalog has nothing to draw from.
    #[error("{catalog} catalog is empty")]
    EmptyCatalog { catalog: &'static str },

    /// A score range contains no values.
    #[error("Invalid {mode} score range: {min}..{max}")]
    InvalidScoreRange {
        mode: &'static str,
        min: u32,
        max: u32,
    },

    /// A probability lies outside 0.0..=1.0.
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// Manual mode was configured to produce no candidates.
    #[error("Manual option count must be at least 1")]
    ZeroOptionCount,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MatchStoreError {
    /// Creates an empty catalog error.
    pub fn empty_catalog(catalog: &'static str) -> Self {
        Self::EmptyCatalog { catalog }
    }
}

/// Result type for match store operations.
pub type MatchStoreResult<T> = Result<T, MatchStoreError>;
