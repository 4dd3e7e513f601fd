//! Error types for the video platform client

/// Result type alias for video platform operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the video platform client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API answered with a non-success status
    #[error("Video API returned error status: {0}")]
    Api(reqwest::StatusCode),

    /// The video exposes no audio format we can play
    #[error("No playable audio stream for video {0}")]
    NoAudioStream(String),

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
