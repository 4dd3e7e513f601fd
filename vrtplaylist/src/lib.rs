//! # vrtplaylist - Song Queue Core for VrtCast
//!
//! `vrtplaylist` holds the domain model shared by the VrtCast crates:
//! songs as reported by the radio feed, their resolved video matches, and
//! the deduplicating play queue that reconciles successive feed polls.
//!
//! ## Features
//!
//! - **Value Semantics**: `Song` is an immutable value with a dual equality
//!   rule (feed codes override artist/title when both sides carry one)
//! - **Deduplicating Queue**: `SongQueue` merges feed batches front or back
//!   without ever re-admitting a song it has seen before
//! - **Resolver Seam**: the `VideoResolver` trait decouples the queue from
//!   the HTTP client that looks songs up on the video platform
//!
//! ## Quick Start
//!
//! ```
//! use vrtplaylist::{MergeMode, Song, SongQueue};
//!
//! let mut queue = SongQueue::new();
//! queue.enqueue_back(Song::new("Daft Punk", "Da Funk", Some("4120597".to_string())));
//!
//! let mut batch = SongQueue::new();
//! batch.enqueue_back(Song::new("Air", "Sexy Boy", Some("4120611".to_string())));
//! queue.merge(batch, MergeMode::Front);
//!
//! assert_eq!(queue.len(), 2);
//! ```

pub mod error;
pub mod queue;
pub mod resolver;
pub mod song;

// Re-exports for convenience
pub use error::{Error, Result};
pub use queue::{MergeMode, QueuedSong, SongQueue};
pub use resolver::VideoResolver;
pub use song::{Song, SongKey, VideoMatch};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
