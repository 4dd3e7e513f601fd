//! HTTP client for video search and stream resolution

use crate::error::{Error, Result};
use crate::models::{SearchResult, VideoDetails};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
use vrtplaylist::{VideoMatch, VideoResolver};

/// Default API base URL (any Invidious-compatible instance)
pub const DEFAULT_API_BASE: &str = "https://yewtu.be";

/// Default timeout for video API requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "vrttube/0.1.0";

/// Video platform HTTP client
///
/// Looks songs up with a free-text search and resolves the playable audio
/// stream of the best match. The search takes the platform's first hit at
/// face value; ranking beyond that is the platform's business.
///
/// # Example
///
/// ```no_run
/// use vrttube::TubeClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = TubeClient::new()?;
///     if let Some(found) = client.search_videos("Air - Sexy Boy").await? {
///         println!("Found: {} ({})", found.title, found.video_id);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TubeClient {
    pub(crate) client: Client,
    api_base: String,
    request_timeout: Duration,
}

impl TubeClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> TubeClientBuilder {
        TubeClientBuilder::default()
    }

    /// Search the platform and return the first hit
    ///
    /// Returns `Ok(None)` when the platform has no result for the query.
    pub async fn search_videos(&self, query: &str) -> Result<Option<VideoMatch>> {
        let mut url = Url::parse(&format!("{}/api/v1/search", self.api_base))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", "video");

        debug!("Searching videos: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api(response.status()));
        }

        let results: Vec<SearchResult> = response.json().await?;
        match results.into_iter().next() {
            Some(hit) => {
                debug!(video_id = %hit.video_id, title = %hit.title, "Search hit");
                Ok(Some(VideoMatch::new(hit.title, hit.video_id)))
            }
            None => {
                info!(query = %query, "No video found");
                Ok(None)
            }
        }
    }

    /// Resolve the playable audio stream URL for a video
    ///
    /// Picks the highest-bitrate audio-only format the platform offers.
    pub async fn stream_url(&self, video_id: &str) -> Result<String> {
        let url = Url::parse(&format!("{}/api/v1/videos/{}", self.api_base, video_id))?;

        debug!("Resolving stream: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api(response.status()));
        }

        let details: VideoDetails = response.json().await?;
        details
            .best_audio()
            .map(|format| format.url.clone())
            .ok_or_else(|| Error::NoAudioStream(video_id.to_string()))
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl VideoResolver for TubeClient {
    async fn search(&self, query: &str) -> anyhow::Result<Option<VideoMatch>> {
        Ok(self.search_videos(query).await?)
    }

    async fn resolve_stream_url(&self, video: &VideoMatch) -> anyhow::Result<String> {
        Ok(self.stream_url(&video.video_id).await?)
    }
}

/// Builder for configuring a TubeClient
#[derive(Debug)]
pub struct TubeClientBuilder {
    client: Option<Client>,
    api_base: String,
    request_timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for TubeClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl TubeClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the API base URL
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<TubeClient> {
        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.request_timeout);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::other(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(TubeClient {
            client,
            api_base: self.api_base,
            request_timeout: self.request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = TubeClientBuilder::default();
        assert_eq!(builder.api_base, DEFAULT_API_BASE);
        assert_eq!(
            builder.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }
}
