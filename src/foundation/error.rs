/// Convenience result type used across algoviz.
pub type AlgoResult<T> = Result<T, AlgoError>;

/// Top-level error taxonomy used by the run API.
///
/// Cancellation is not an error: a cancelled run ends in the terminal
/// [`crate::RunStatus::Cancelled`].
#[derive(thiserror::Error, Debug)]
pub enum AlgoError {
    /// Malformed algorithm input, rejected before any snapshot is emitted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An internal invariant broke mid-run (union-find, tree shape, ...).
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// Errors when serializing or deserializing requests and results.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AlgoError {
    /// Build an [`AlgoError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build an [`AlgoError::Invariant`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Build an [`AlgoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
