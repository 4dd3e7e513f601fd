//! Data models for the VRT playlist feed

use crate::error::Error;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use vrtplaylist::Song;

/// A VRT radio station carried by the playlist feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Station {
    /// Studio Brussel
    StuBru,
    /// Radio 1
    Radio1,
    /// MNM
    Mnm,
    /// MNM Hits
    MnmHits,
}

impl Station {
    /// All stations, in CLI help order
    pub const ALL: [Station; 4] = [
        Station::StuBru,
        Station::Radio1,
        Station::Mnm,
        Station::MnmHits,
    ];

    /// The feed's numeric channel code for this station
    pub fn channel_code(&self) -> u32 {
        match self {
            Station::StuBru => 41,
            Station::Radio1 => 11,
            Station::Mnm => 55,
            Station::MnmHits => 56,
        }
    }

    /// The short slug used on the command line and in the configuration
    pub fn slug(&self) -> &'static str {
        match self {
            Station::StuBru => "stubru",
            Station::Radio1 => "radio1",
            Station::Mnm => "mnm",
            Station::MnmHits => "mnmhits",
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Station {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stubru" => Ok(Station::StuBru),
            "radio1" => Ok(Station::Radio1),
            "mnm" => Ok(Station::Mnm),
            "mnmhits" => Ok(Station::MnmHits),
            other => Err(Error::UnknownStation(other.to_string())),
        }
    }
}

// Property keys used by the feed
const PROP_ARTIST: &str = "ARTISTNAME";
const PROP_TITLE: &str = "TITLE";

/// One key/value property of a broadcast item
#[derive(Debug, Clone, Deserialize)]
pub struct ItemProperty {
    pub key: String,
    pub value: String,
}

/// One broadcast item (a song that went on air)
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    /// Stable identifier assigned by the feed
    pub code: String,
    /// Loose key/value bag; artist and title live here
    #[serde(default)]
    pub properties: Vec<ItemProperty>,
}

impl PlaylistItem {
    fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// The artist name, if the feed provided one
    pub fn artist(&self) -> Option<&str> {
        self.property(PROP_ARTIST)
    }

    /// The song title, if the feed provided one
    pub fn title(&self) -> Option<&str> {
        self.property(PROP_TITLE)
    }

    /// Convert this item into a [`Song`], keeping the feed code
    ///
    /// Returns `None` when artist or title is missing; such items cannot
    /// be searched for and are skipped by the client.
    pub fn into_song(self) -> Option<Song> {
        let artist = self.artist()?.to_string();
        let title = self.title()?.to_string();
        Some(Song::new(artist, title, Some(self.code)))
    }
}

/// Link to a neighbouring feed page
#[derive(Debug, Clone, Deserialize)]
pub struct PageLink {
    pub href: String,
}

/// One page of the playlist-items feed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPage {
    #[serde(default)]
    pub playlist_items: Vec<PlaylistItem>,
    /// Continuation link for ascending (replay) queries
    pub next: Option<PageLink>,
}

impl PlaylistPage {
    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.playlist_items.len()
    }

    /// True when the page carries no items
    pub fn is_empty(&self) -> bool {
        self.playlist_items.is_empty()
    }
}
