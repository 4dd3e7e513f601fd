//! # vrttube - Video Lookup Client for VrtCast
//!
//! `vrttube` locates songs on a video platform (any Invidious-compatible
//! API) and resolves the audio stream URL to hand to the player. It is the
//! concrete implementation of [`vrtplaylist::VideoResolver`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use vrttube::TubeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TubeClient::builder()
//!         .api_base("https://yewtu.be")
//!         .build()?;
//!
//!     if let Some(found) = client.search_videos("Air - Sexy Boy").await? {
//!         let stream = client.stream_url(&found.video_id).await?;
//!         println!("{} -> {}", found.title, stream);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;

// Re-exports for convenience
pub use client::{TubeClient, TubeClientBuilder};
pub use config_ext::TubeConfigExt;
pub use error::{Error, Result};
pub use models::{AdaptiveFormat, SearchResult, VideoDetails};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
