//! HTTP client for the VRT playlist-items API

use crate::error::{Error, Result};
use crate::models::{PlaylistItem, PlaylistPage, Station};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use vrtplaylist::SongQueue;

/// Default playlist-items endpoint
pub const DEFAULT_BASE_URL: &str = "http://services.vrt.be/playlist/items";

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default timeout for feed HTTP requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "vrtfeed/0.1.0";

/// Media type the feed requires for its versioned JSON representation
pub const ACCEPT_HEADER: &str = "application/vnd.playlist.vrt.be.playlist_items_1.0+json";

/// VRT playlist feed HTTP client
///
/// Every fetch method returns a [`SongQueue`] normalized to broadcast order
/// (oldest song first), so callers can merge it directly into their play
/// queue. The client tracks the feed's pagination state internally: after a
/// `fetch_latest` it knows where older pages start, and after a
/// `fetch_since` it knows where the replay continues.
///
/// # Example
///
/// ```no_run
/// use vrtfeed::{Station, VrtFeedClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = VrtFeedClient::builder()
///         .station(Station::Radio1)
///         .build()?;
///     let batch = client.fetch_latest().await?;
///     println!("{} songs on air recently", batch.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct VrtFeedClient {
    pub(crate) client: Client,
    base_url: String,
    station: Station,
    page_size: u32,
    request_timeout: Duration,
    /// Code of the oldest item seen, for descending backfill pages
    cursor: Option<String>,
    /// Continuation link of an ascending (replay) query
    next_href: Option<String>,
    /// Set once `fetch_since` was used; backfill then follows `next_href`
    /// instead of the descending cursor
    replay: bool,
}

impl VrtFeedClient {
    /// Create a client for a station with default settings
    pub fn new(station: Station) -> Result<Self> {
        Self::builder().station(station).build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> FeedClientBuilder {
        FeedClientBuilder::default()
    }

    /// The station this client polls
    pub fn station(&self) -> Station {
        self.station
    }

    /// Fetch the most recently broadcast songs
    ///
    /// Queries the feed in descending order and remembers the oldest item
    /// code so later `fetch_older` calls can page further back.
    pub async fn fetch_latest(&mut self) -> Result<SongQueue> {
        let mut url = self.base_query()?;
        url.query_pairs_mut().append_pair("ascending", "false");
        let page = self.get_page(url).await?;

        if let Some(last) = page.playlist_items.last() {
            self.cursor = Some(last.code.clone());
        }

        // Feed answers newest-first, queue wants broadcast order
        Ok(queue_from_items(page.playlist_items.into_iter().rev()))
    }

    /// Fetch the next batch continuing the previous fetch away from "now"
    ///
    /// After a `fetch_since` this follows the feed's continuation link
    /// (replaying forward in time); otherwise it pages backwards from the
    /// oldest item seen so far. Without any pagination state it behaves
    /// like `fetch_latest`. In replay mode an exhausted feed yields an
    /// empty batch.
    pub async fn fetch_older(&mut self) -> Result<SongQueue> {
        if self.replay {
            return match self.next_href.take() {
                Some(href) => {
                    let page = self.get_page(Url::parse(&href)?).await?;
                    self.next_href = page.next.as_ref().map(|link| link.href.clone());
                    // Ascending pages are already in broadcast order
                    Ok(queue_from_items(page.playlist_items.into_iter()))
                }
                None => Ok(SongQueue::new()),
            };
        }

        let Some(cursor) = self.cursor.clone() else {
            return self.fetch_latest().await;
        };

        let mut url = self.base_query()?;
        url.query_pairs_mut()
            .append_pair("ascending", "false")
            .append_pair("begin", &cursor);
        let page = self.get_page(url).await?;

        if let Some(last) = page.playlist_items.last() {
            self.cursor = Some(last.code.clone());
        }

        Ok(queue_from_items(page.playlist_items.into_iter().rev()))
    }

    /// Fetch songs broadcast from `from` (ISO-8601) onwards
    ///
    /// Switches the client into replay mode: subsequent `fetch_older`
    /// calls follow the feed's continuation link forward in time.
    pub async fn fetch_since(&mut self, from: &str) -> Result<SongQueue> {
        let mut url = self.base_query()?;
        url.query_pairs_mut()
            .append_pair("ascending", "true")
            .append_pair("from", from);
        let page = self.get_page(url).await?;

        self.replay = true;
        self.next_href = page.next.as_ref().map(|link| link.href.clone());

        Ok(queue_from_items(page.playlist_items.into_iter()))
    }

    /// Build the query shared by all fetches
    ///
    /// Built fresh for every request; sort direction and pagination
    /// parameters are appended by the individual fetch methods.
    fn base_query(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("type", "song")
            .append_pair("page_size", &self.page_size.to_string())
            .append_pair("channel_code", &self.station.channel_code().to_string());
        Ok(url)
    }

    async fn get_page(&self, url: Url) -> Result<PlaylistPage> {
        debug!("Fetching playlist page: {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_HEADER)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api(response.status()));
        }

        let page: PlaylistPage = response.json().await?;
        debug!(items = page.len(), "Received playlist page");
        Ok(page)
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}

/// Build a batch queue from items in broadcast order
fn queue_from_items(items: impl Iterator<Item = PlaylistItem>) -> SongQueue {
    let mut queue = SongQueue::new();
    for item in items {
        let code = item.code.clone();
        match item.into_song() {
            Some(song) => {
                queue.enqueue_back(song);
            }
            None => warn!(code = %code, "Skipping feed item without artist or title"),
        }
    }
    queue
}

/// Builder for configuring a VrtFeedClient
#[derive(Debug)]
pub struct FeedClientBuilder {
    client: Option<Client>,
    base_url: String,
    station: Station,
    page_size: u32,
    request_timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for FeedClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            station: Station::StuBru,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl FeedClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the playlist-items endpoint URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the station to poll
    pub fn station(mut self, station: Station) -> Self {
        self.station = station;
        self
    }

    /// Set the number of items requested per page
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
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
    pub fn build(self) -> Result<VrtFeedClient> {
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

        Ok(VrtFeedClient {
            client,
            base_url: self.base_url,
            station: self.station,
            page_size: self.page_size,
            request_timeout: self.request_timeout,
            cursor: None,
            next_href: None,
            replay: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = FeedClientBuilder::default();
        assert_eq!(builder.base_url, DEFAULT_BASE_URL);
        assert_eq!(builder.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(builder.station, Station::StuBru);
    }

    #[test]
    fn test_base_query_parameters() {
        let client = VrtFeedClient::builder()
            .station(Station::Mnm)
            .page_size(5)
            .build()
            .unwrap();

        let url = client.base_query().unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert!(pairs.contains(&("type".to_string(), "song".to_string())));
        assert!(pairs.contains(&("page_size".to_string(), "5".to_string())));
        assert!(pairs.contains(&("channel_code".to_string(), "55".to_string())));
    }
}
