//! Playback session: the reconciliation and playback loop
//!
//! One session follows one station. Every iteration merges the freshest
//! feed batch into the queue (live mode), backfills when the queue runs
//! dry, resolves queued songs to streams, waits for the current track to
//! finish, and starts the next one.

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};
use vrtfeed::VrtFeedClient;
use vrtplayer::{PlayLog, PlaybackDriver};
use vrtplaylist::{MergeMode, SongQueue};
use vrttube::TubeClient;

/// How long a live session sleeps when the feed yields nothing new
pub const EMPTY_QUEUE_RETRY_SECS: u64 = 30;

/// A running playback session for one station
pub struct Session {
    feed: VrtFeedClient,
    resolver: TubeClient,
    player: PlaybackDriver,
    playlog: PlayLog,
    queue: SongQueue,
    /// Replay start timestamp; `None` means following the live feed
    start_from: Option<String>,
}

impl Session {
    /// Create a session from its collaborators
    ///
    /// `start_from` switches the session into history mode: the queue is
    /// seeded from that timestamp onwards and the session ends when the
    /// feed is exhausted.
    pub fn new(
        feed: VrtFeedClient,
        resolver: TubeClient,
        player: PlaybackDriver,
        playlog: PlayLog,
        start_from: Option<String>,
    ) -> Self {
        Self {
            feed,
            resolver,
            player,
            playlog,
            queue: SongQueue::new(),
            start_from,
        }
    }

    fn is_live(&self) -> bool {
        self.start_from.is_none()
    }

    /// Run the session until the feed is exhausted (history mode) or the
    /// process is stopped
    ///
    /// Feed errors are fatal and propagate out.
    pub async fn run(&mut self) -> Result<()> {
        let seed = match self.start_from.clone() {
            Some(from) => {
                info!(from = %from, station = %self.feed.station(), "Replaying history");
                self.feed.fetch_since(&from).await?
            }
            None => {
                info!(station = %self.feed.station(), "Following the live feed");
                self.feed.fetch_latest().await?
            }
        };
        self.queue.merge(seed, MergeMode::Front);

        loop {
            // Fresh songs first; the live feed is polled every iteration
            if self.is_live() {
                let batch = self.feed.fetch_latest().await?;
                self.queue.merge(batch, MergeMode::Front);
            }

            // Backfill when we have nothing left to play
            if self.queue.is_empty() {
                debug!("Queue empty, backfilling");
                let batch = self.feed.fetch_older().await?;
                self.queue.merge(batch, MergeMode::Back);
            }

            self.queue.resolve_pending(&self.resolver).await;

            if self.queue.is_empty() {
                if self.is_live() {
                    debug!(
                        retry_secs = EMPTY_QUEUE_RETRY_SECS,
                        "Nothing to play, waiting for the feed"
                    );
                    tokio::time::sleep(Duration::from_secs(EMPTY_QUEUE_RETRY_SECS)).await;
                    continue;
                }
                info!("Feed exhausted, ending replay");
                break;
            }

            // Let the current track finish before starting the next one
            self.player.wait().await?;

            let entry = self.queue.pop_front()?;
            let Some(video) = entry.video else {
                // Unresolved songs are skipped without playing or logging
                continue;
            };
            let Some(url) = video.stream_url.as_deref() else {
                continue;
            };

            let plays =
                self.playlog
                    .record_play(entry.song.artist(), entry.song.title(), &video.video_id)?;
            info!(song = %entry.song, video_id = %video.video_id, plays, "Playing");
            self.player.play(url)?;
        }

        // Let the last track play out
        self.player.wait().await?;
        Ok(())
    }
}
