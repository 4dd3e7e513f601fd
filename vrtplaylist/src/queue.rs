//! Deduplicating song queue
//!
//! The queue reconciles successive polls of the radio feed into a single
//! ordered play queue. Its history set records every song ever admitted and
//! never shrinks, so a song that was queued (or dropped as unresolvable) is
//! never admitted a second time.

use crate::error::{Error, Result};
use crate::resolver::VideoResolver;
use crate::song::{Song, SongKey, VideoMatch};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};

/// Where a merged batch lands relative to the existing queue entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Batch goes ahead of existing entries (fresher than what we hold)
    Front,
    /// Batch is appended after existing entries (backfill)
    Back,
}

/// A queued song together with its video match, once resolved
#[derive(Debug, Clone)]
pub struct QueuedSong {
    pub song: Song,
    pub video: Option<VideoMatch>,
}

impl QueuedSong {
    fn new(song: Song) -> Self {
        Self { song, video: None }
    }
}

/// Ordered play queue with a cumulative dedup history
///
/// Invariants:
/// - every queued song's key is present in the history set
/// - no two queued entries share a key
#[derive(Debug, Default)]
pub struct SongQueue {
    entries: VecDeque<QueuedSong>,
    history: HashSet<SongKey>,
}

impl SongQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of songs waiting in the queue
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no songs are waiting
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a song with this identity was ever admitted
    pub fn has_seen(&self, song: &Song) -> bool {
        self.history.contains(&song.key())
    }

    /// Admit a song at the front of the queue
    ///
    /// Returns `false` (and leaves the queue untouched) when a song with
    /// the same identity was already admitted at some point.
    pub fn enqueue_front(&mut self, song: Song) -> bool {
        self.admit_front(QueuedSong::new(song))
    }

    /// Admit a song at the back of the queue
    ///
    /// Returns `false` (and leaves the queue untouched) when a song with
    /// the same identity was already admitted at some point.
    pub fn enqueue_back(&mut self, song: Song) -> bool {
        self.admit_back(QueuedSong::new(song))
    }

    fn admit_front(&mut self, entry: QueuedSong) -> bool {
        if !self.history.insert(entry.song.key()) {
            return false;
        }
        self.entries.push_front(entry);
        true
    }

    fn admit_back(&mut self, entry: QueuedSong) -> bool {
        if !self.history.insert(entry.song.key()) {
            return false;
        }
        self.entries.push_back(entry);
        true
    }

    /// Fold another queue's entries into this one
    ///
    /// Songs already admitted here are silently discarded; entries that
    /// carry a resolved video keep it. With `MergeMode::Front` the
    /// incoming batch lands as a block ahead of all existing entries,
    /// keeping the batch's own internal order; with `MergeMode::Back` it
    /// is appended in order.
    pub fn merge(&mut self, other: SongQueue, mode: MergeMode) {
        let mut admitted = 0usize;
        match mode {
            MergeMode::Front => {
                // Insert the batch as a block: pushing one by one to the
                // front would reverse its internal order.
                for entry in other.entries.into_iter().rev() {
                    let song = entry.song.clone();
                    if self.admit_front(entry) {
                        info!(song = %song, "New song queued");
                        admitted += 1;
                    }
                }
            }
            MergeMode::Back => {
                for entry in other.entries {
                    let song = entry.song.clone();
                    if self.admit_back(entry) {
                        info!(song = %song, "New song queued");
                        admitted += 1;
                    }
                }
            }
        }
        debug!(admitted, queued = self.entries.len(), "Merged feed batch");
    }

    /// Remove and return the next song to play
    pub fn pop_front(&mut self) -> Result<QueuedSong> {
        self.entries.pop_front().ok_or(Error::EmptyQueue)
    }

    /// Attach a video match (with a playable stream URL) to every queued
    /// song that does not have one yet
    ///
    /// Songs the platform cannot match, and songs whose stream URL cannot
    /// be resolved, are removed from the queue. Their keys stay in the
    /// history set, so they are skipped for good rather than retried.
    pub async fn resolve_pending(&mut self, resolver: &dyn VideoResolver) {
        let mut kept = VecDeque::with_capacity(self.entries.len());

        for mut entry in std::mem::take(&mut self.entries) {
            if entry.video.is_some() {
                kept.push_back(entry);
                continue;
            }

            let query = entry.song.search_term();
            match resolver.search(&query).await {
                Ok(Some(mut video)) => match resolver.resolve_stream_url(&video).await {
                    Ok(url) => {
                        debug!(song = %entry.song, video_id = %video.video_id, "Resolved video");
                        video.stream_url = Some(url);
                        entry.video = Some(video);
                        kept.push_back(entry);
                    }
                    Err(err) => {
                        warn!(song = %entry.song, error = %err, "Dropping song, stream resolution failed");
                    }
                },
                Ok(None) => {
                    info!(song = %entry.song, "Dropping song, no video found");
                }
                Err(err) => {
                    warn!(song = %entry.song, error = %err, "Dropping song, search failed");
                }
            }
        }

        self.entries = kept;
    }

    /// Iterate over the queued songs in play order
    pub fn iter(&self) -> impl Iterator<Item = &QueuedSong> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::collections::HashMap;

    fn song(artist: &str, title: &str, code: &str) -> Song {
        Song::new(artist, title, Some(code.to_string()))
    }

    fn batch(songs: &[Song]) -> SongQueue {
        let mut queue = SongQueue::new();
        for s in songs {
            queue.enqueue_back(s.clone());
        }
        queue
    }

    /// In-memory resolver: maps search terms to video ids, everything else
    /// is a miss
    struct StubResolver {
        matches: HashMap<String, String>,
        fail_stream_for: Option<String>,
    }

    impl StubResolver {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                matches: pairs
                    .iter()
                    .map(|(q, id)| (q.to_string(), id.to_string()))
                    .collect(),
                fail_stream_for: None,
            }
        }
    }

    #[async_trait]
    impl VideoResolver for StubResolver {
        async fn search(&self, query: &str) -> anyhow::Result<Option<VideoMatch>> {
            Ok(self
                .matches
                .get(query)
                .map(|id| VideoMatch::new(query, id.clone())))
        }

        async fn resolve_stream_url(&self, video: &VideoMatch) -> anyhow::Result<String> {
            if self.fail_stream_for.as_deref() == Some(video.video_id.as_str()) {
                return Err(anyhow!("no audio stream"));
            }
            Ok(format!("https://streams.example/{}", video.video_id))
        }
    }

    #[test]
    fn test_enqueue_dedup() {
        let mut queue = SongQueue::new();
        assert!(queue.enqueue_back(song("A", "One", "1")));
        assert!(!queue.enqueue_back(song("A", "One", "1")));
        assert!(!queue.enqueue_front(song("A", "One", "1")));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_front_merge_preserves_batch_order() {
        let s1 = song("A", "One", "1");
        let s2 = song("B", "Two", "2");
        let s3 = song("C", "Three", "3");

        let mut queue = SongQueue::new();
        queue.merge(batch(&[s1.clone(), s2.clone(), s3.clone()]), MergeMode::Front);

        assert_eq!(queue.pop_front().unwrap().song, s1);
        assert_eq!(queue.pop_front().unwrap().song, s2);
        assert_eq!(queue.pop_front().unwrap().song, s3);
        assert!(queue.pop_front().is_err());
    }

    #[test]
    fn test_front_merge_goes_ahead_of_existing() {
        let s1 = song("A", "One", "1");
        let s2 = song("B", "Two", "2");
        let s3 = song("C", "Three", "3");

        let mut queue = batch(&[s1.clone()]);
        queue.merge(batch(&[s2.clone(), s3.clone()]), MergeMode::Front);

        assert_eq!(queue.pop_front().unwrap().song, s2);
        assert_eq!(queue.pop_front().unwrap().song, s3);
        assert_eq!(queue.pop_front().unwrap().song, s1);
    }

    #[test]
    fn test_front_merge_skips_known_songs() {
        let s1 = song("A", "One", "1");
        let s2 = song("B", "Two", "2");

        let mut queue = batch(&[s1.clone()]);
        // Batch re-reports s1 along with a genuinely new s2
        queue.merge(batch(&[s2.clone(), s1.clone()]), MergeMode::Front);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_front().unwrap().song, s2);
        assert_eq!(queue.pop_front().unwrap().song, s1);
    }

    #[test]
    fn test_back_merge_appends_in_order() {
        let s1 = song("A", "One", "1");
        let s4 = song("D", "Four", "4");
        let s5 = song("E", "Five", "5");

        let mut queue = batch(&[s1.clone()]);
        queue.merge(batch(&[s4.clone(), s5.clone()]), MergeMode::Back);

        assert_eq!(queue.pop_front().unwrap().song, s1);
        assert_eq!(queue.pop_front().unwrap().song, s4);
        assert_eq!(queue.pop_front().unwrap().song, s5);
    }

    #[test]
    fn test_merge_keeps_resolved_videos() {
        let s1 = song("A", "One", "1");
        let s2 = song("B", "Two", "2");

        let mut resolved = batch(&[s1.clone()]);
        let mut video = VideoMatch::new("A - One", "vid1");
        video.stream_url = Some("https://streams.example/vid1".to_string());
        resolved.entries[0].video = Some(video.clone());

        let mut queue = batch(&[s2.clone()]);
        queue.merge(resolved, MergeMode::Front);

        let first = queue.pop_front().unwrap();
        assert_eq!(first.song, s1);
        assert_eq!(first.video, Some(video));
        assert!(queue.pop_front().unwrap().video.is_none());
    }

    #[test]
    fn test_history_outlives_queue_contents() {
        let s1 = song("A", "One", "1");

        let mut queue = batch(&[s1.clone()]);
        queue.pop_front().unwrap();
        assert!(queue.is_empty());

        // Popped songs are still known and are not re-admitted
        assert!(queue.has_seen(&s1));
        queue.merge(batch(&[s1.clone()]), MergeMode::Front);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_pending_attaches_streams() {
        let s1 = song("A", "One", "1");
        let mut queue = batch(&[s1.clone()]);

        let resolver = StubResolver::new(&[("A - One", "vid1")]);
        queue.resolve_pending(&resolver).await;

        let entry = queue.pop_front().unwrap();
        let video = entry.video.unwrap();
        assert_eq!(video.video_id, "vid1");
        assert_eq!(
            video.stream_url.as_deref(),
            Some("https://streams.example/vid1")
        );
    }

    #[tokio::test]
    async fn test_resolve_pending_drops_unmatched() {
        let s1 = song("A", "One", "1");
        let s2 = song("B", "Two", "2");
        let mut queue = batch(&[s1.clone(), s2.clone()]);

        // Only s2 has a match
        let resolver = StubResolver::new(&[("B - Two", "vid2")]);
        queue.resolve_pending(&resolver).await;

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_front().unwrap().song, s2);

        // The unmatched song stays in history and is never retried
        assert!(queue.has_seen(&s1));
        queue.merge(batch(&[s1.clone()]), MergeMode::Back);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_pending_drops_on_stream_failure() {
        let s1 = song("A", "One", "1");
        let mut queue = batch(&[s1.clone()]);

        let mut resolver = StubResolver::new(&[("A - One", "vid1")]);
        resolver.fail_stream_for = Some("vid1".to_string());
        queue.resolve_pending(&resolver).await;

        assert!(queue.is_empty());
        assert!(queue.has_seen(&s1));
    }

    #[tokio::test]
    async fn test_resolve_pending_keeps_existing_matches() {
        let s1 = song("A", "One", "1");
        let mut queue = batch(&[s1.clone()]);

        let resolver = StubResolver::new(&[("A - One", "vid1")]);
        queue.resolve_pending(&resolver).await;
        // Second pass finds nothing to do
        let empty = StubResolver::new(&[]);
        queue.resolve_pending(&empty).await;

        assert_eq!(queue.len(), 1);
        assert!(queue.iter().all(|e| e.video.is_some()));
    }
}
