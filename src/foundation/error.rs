use std::path::PathBuf;

/// Convenience result type used across Sinescape.
pub type SinescapeResult<T> = Result<T, SinescapeError>;

/// Top-level error taxonomy used by the public APIs.
#[derive(thiserror::Error, Debug)]
pub enum SinescapeError {
    /// Invalid caller-provided data (waves, frame rate, surfaces, scene documents).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem failure, tagged with the path that was being touched.
    #[error("io error at '{}': {source}", .path.display())]
    Io {
        /// Path of the file or directory involved.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A still-image or animated-image encoder rejected its input.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Errors when deserializing scene documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SinescapeError {
    /// Build a [`SinescapeError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`SinescapeError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`SinescapeError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`SinescapeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
