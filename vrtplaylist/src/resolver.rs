//! Seam between the queue and the video platform client

use crate::song::VideoMatch;
use anyhow::Result;
use async_trait::async_trait;

/// Locates videos and playable stream URLs for songs
///
/// Implemented by the HTTP client crate; the queue only depends on this
/// trait so it can be exercised with an in-memory stub in tests.
#[async_trait]
pub trait VideoResolver: Send + Sync {
    /// Search the platform for `query` and return the best match
    ///
    /// Returns `Ok(None)` when the platform has no result for the query.
    /// This is an expected outcome, not an error.
    async fn search(&self, query: &str) -> Result<Option<VideoMatch>>;

    /// Resolve the playable audio stream URL for a previously found match
    async fn resolve_stream_url(&self, video: &VideoMatch) -> Result<String>;
}
