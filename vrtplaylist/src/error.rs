//! Error types for the song queue

/// Result type alias for queue operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when operating on the song queue
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Pop attempted on an empty queue
    #[error("Cannot pop from an empty queue")]
    EmptyQueue,

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
