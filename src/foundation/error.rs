/// Convenience result type used across the crate.
pub type PsdResult<T> = Result<T, PsdError>;

/// Top-level error taxonomy used by encoder APIs.
#[derive(thiserror::Error, Debug)]
pub enum PsdError {
    /// Invalid layer or canvas data, rejected before any output is written.
    #[error("validation error: {0}")]
    Validation(String),

    /// The output sink failed mid-write (disk full, closed stream).
    #[error("sink error: {0}")]
    Sink(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies or IO setup.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PsdError {
    /// Build a [`PsdError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
