//! # vrtplayer - Playback Driver and Play Log for VrtCast
//!
//! `vrtplayer` streams audio by driving an external player process (mplayer
//! by default) and records what was played in a CSV log.
//!
//! ## Features
//!
//! - **Single Player Invariant**: at most one player process at a time;
//!   starting a new stream always tears the previous process down first
//! - **Play Accounting**: one CSV record per (artist, title) pair with a
//!   play counter, rewritten atomically on updates
//!
//! ## Quick Start
//!
//! ```no_run
//! use vrtplayer::{PlayLog, PlaybackDriver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = PlayLog::new("playlog.csv");
//!     let mut player = PlaybackDriver::new();
//!
//!     log.record_play("Air", "Sexy Boy", "abc123")?;
//!     player.play("https://a.example/stream")?;
//!     player.wait().await?;
//!     Ok(())
//! }
//! ```

pub mod config_ext;
pub mod error;
pub mod player;
pub mod playlog;

// Re-exports for convenience
pub use config_ext::PlayerConfigExt;
pub use error::{Error, Result};
pub use player::{PlaybackDriver, PlayerState};
pub use playlog::{PlayLog, PlayRecord};

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
