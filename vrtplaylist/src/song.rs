//! Song and video match value types

use std::fmt;

/// A song as reported by the radio playlist feed
///
/// Artist and title are trimmed at construction and never mutated
/// afterwards. `feed_code` is the stable identifier the feed assigns to a
/// broadcast item; older feed variants omit it.
#[derive(Debug, Clone)]
pub struct Song {
    artist: String,
    title: String,
    feed_code: Option<String>,
}

impl Song {
    /// Create a song, trimming surrounding whitespace from artist and title
    pub fn new(artist: impl Into<String>, title: impl Into<String>, feed_code: Option<String>) -> Self {
        Self {
            artist: artist.into().trim().to_string(),
            title: title.into().trim().to_string(),
            feed_code,
        }
    }

    /// The performing artist (trimmed)
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// The song title (trimmed)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The feed's stable identifier for this broadcast item, if any
    pub fn feed_code(&self) -> Option<&str> {
        self.feed_code.as_deref()
    }

    /// The free-text query used to look this song up on the video platform
    pub fn search_term(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }

    /// The identifying key used by the queue's history set
    ///
    /// The feed code wins when present; artist/title metadata is the
    /// fallback identity for items without one.
    pub fn key(&self) -> SongKey {
        match &self.feed_code {
            Some(code) => SongKey::Code(code.clone()),
            None => SongKey::Metadata(self.artist.clone(), self.title.clone()),
        }
    }
}

/// Dual equality rule: when both songs carry a feed code, the codes decide
/// (even if artist/title differ); otherwise trimmed artist and title must
/// match exactly, case-sensitively.
impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        match (&self.feed_code, &other.feed_code) {
            (Some(a), Some(b)) => a == b,
            _ => self.artist == other.artist && self.title == other.title,
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// Identifying key for the queue's cumulative history set
///
/// Unlike `Song` equality, this is a total equivalence (hashable): a song
/// is keyed by its feed code when it has one, by its metadata otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SongKey {
    /// Feed-assigned broadcast item code
    Code(String),
    /// Trimmed artist and title, for items without a code
    Metadata(String, String),
}

/// A video located on the media platform for a song
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMatch {
    /// Title of the matched video
    pub title: String,
    /// Platform identifier of the video
    pub video_id: String,
    /// Playable audio stream URL, populated by the resolution step
    pub stream_url: Option<String>,
}

impl VideoMatch {
    /// Create a match without a resolved stream URL
    pub fn new(title: impl Into<String>, video_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            video_id: video_id.into(),
            stream_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_on_construction() {
        let song = Song::new("  Daft Punk ", " Da Funk\t", None);
        assert_eq!(song.artist(), "Daft Punk");
        assert_eq!(song.title(), "Da Funk");
    }

    #[test]
    fn test_codes_override_metadata() {
        let a = Song::new("Daft Punk", "Da Funk", Some("100".to_string()));
        let b = Song::new("Daft Punk (Live)", "Da Funk (Edit)", Some("100".to_string()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_differing_codes_force_inequality() {
        let a = Song::new("Daft Punk", "Da Funk", Some("100".to_string()));
        let b = Song::new("Daft Punk", "Da Funk", Some("200".to_string()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_metadata_fallback_when_code_missing() {
        let coded = Song::new("Daft Punk", "Da Funk", Some("100".to_string()));
        let plain = Song::new("Daft Punk", "Da Funk", None);
        assert_eq!(coded, plain);
        assert_eq!(plain, coded);

        let other = Song::new("Daft Punk", "Around the World", None);
        assert_ne!(plain, other);
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        let a = Song::new("Daft Punk", "Da Funk", None);
        let b = Song::new("daft punk", "Da Funk", None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_prefers_code() {
        let song = Song::new("Daft Punk", "Da Funk", Some("100".to_string()));
        assert_eq!(song.key(), SongKey::Code("100".to_string()));

        let plain = Song::new("Daft Punk", "Da Funk", None);
        assert_eq!(
            plain.key(),
            SongKey::Metadata("Daft Punk".to_string(), "Da Funk".to_string())
        );
    }

    #[test]
    fn test_search_term() {
        let song = Song::new("Daft Punk", "Da Funk", None);
        assert_eq!(song.search_term(), "Daft Punk - Da Funk");
    }
}
