//! # vrtfeed - VRT Playlist Feed Client
//!
//! `vrtfeed` is an async client for the public VRT playlist-items API, the
//! feed behind the "now playing" pages of Studio Brussel, Radio 1, MNM and
//! MNM Hits.
//!
//! ## Features
//!
//! - **Station Selection**: typed [`Station`] enum with the feed's channel codes
//! - **Latest Songs**: poll the most recent broadcast items
//! - **Backfill**: page through older items via the feed's pagination cursor
//! - **Replay**: fetch items from an arbitrary start timestamp onwards
//!
//! Every fetch returns a [`vrtplaylist::SongQueue`] normalized to broadcast
//! order (oldest song first), ready to be merged into the play queue.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vrtfeed::{Station, VrtFeedClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = VrtFeedClient::builder()
//!         .station(Station::StuBru)
//!         .build()?;
//!
//!     let batch = client.fetch_latest().await?;
//!     for entry in batch.iter() {
//!         println!("{}", entry.song);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;

// Re-exports for convenience
pub use client::{FeedClientBuilder, VrtFeedClient};
pub use config_ext::VrtFeedConfigExt;
pub use error::{Error, Result};
pub use models::{ItemProperty, PlaylistItem, PlaylistPage, Station};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
