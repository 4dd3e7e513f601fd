//! Error types for playback and the play log

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during playback or play logging
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Atomic replace of the play log failed
    #[error("Failed to replace play log: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// A play log line could not be parsed
    #[error("Malformed play log record: {0}")]
    MalformedRecord(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
