//! Extension to manage feed settings in vrtconfig
//!
//! This module provides the `VrtFeedConfigExt` trait, which adds
//! feed-specific accessors to `vrtconfig::Config`.
//!
//! # Example
//!
//! ```rust,ignore
//! use vrtconfig::get_config;
//! use vrtfeed::VrtFeedConfigExt;
//!
//! let config = get_config();
//! let base_url = config.get_feed_base_url()?;
//! let station = config.get_feed_station()?;
//! ```

use crate::client::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use crate::models::Station;
use anyhow::Result;
use serde_yaml::{Number, Value};
use vrtconfig::Config;

/// Default station slug
const DEFAULT_STATION: &str = "stubru";

/// Extension trait for feed configuration in vrtconfig
pub trait VrtFeedConfigExt {
    /// Gets the playlist-items endpoint URL (default: the public VRT endpoint)
    fn get_feed_base_url(&self) -> Result<String>;

    /// Sets the playlist-items endpoint URL
    fn set_feed_base_url(&self, url: String) -> Result<()>;

    /// Gets the number of items requested per page (default: 20)
    fn get_feed_page_size(&self) -> Result<u32>;

    /// Sets the number of items requested per page
    fn set_feed_page_size(&self, page_size: u32) -> Result<()>;

    /// Gets the station to poll (default: Studio Brussel)
    fn get_feed_station(&self) -> Result<Station>;

    /// Sets the station to poll
    fn set_feed_station(&self, station: Station) -> Result<()>;
}

impl VrtFeedConfigExt for Config {
    fn get_feed_base_url(&self) -> Result<String> {
        match self.get_value(&["feed", "base_url"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_BASE_URL.to_string()),
        }
    }

    fn set_feed_base_url(&self, url: String) -> Result<()> {
        self.set_value(&["feed", "base_url"], Value::String(url))
    }

    fn get_feed_page_size(&self) -> Result<u32> {
        match self.get_value(&["feed", "page_size"]) {
            Ok(Value::Number(n)) if n.is_u64() => Ok(n.as_u64().unwrap() as u32),
            _ => Ok(DEFAULT_PAGE_SIZE),
        }
    }

    fn set_feed_page_size(&self, page_size: u32) -> Result<()> {
        let n = Number::from(page_size);
        self.set_value(&["feed", "page_size"], Value::Number(n))
    }

    fn get_feed_station(&self) -> Result<Station> {
        match self.get_value(&["feed", "station"]) {
            Ok(Value::String(s)) => Ok(s.parse()?),
            _ => Ok(DEFAULT_STATION.parse().expect("default station slug")),
        }
    }

    fn set_feed_station(&self, station: Station) -> Result<()> {
        self.set_value(&["feed", "station"], Value::String(station.slug().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(DEFAULT_STATION.parse::<Station>().unwrap(), Station::StuBru);
        assert_eq!(DEFAULT_PAGE_SIZE, 20);
    }
}
