//! Data models for the video platform API

use serde::Deserialize;

/// One entry of a search response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub video_id: String,
}

/// Bitrate as reported by the API
///
/// Some instances report bitrates as strings, others as numbers.
fn deserialize_bitrate<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        String(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::String(s) => Ok(s.parse().unwrap_or(0)),
    }
}

/// One downloadable format of a video
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveFormat {
    pub url: String,
    /// MIME type with codec, e.g. `audio/webm; codecs="opus"`
    #[serde(rename = "type")]
    pub format_type: String,
    #[serde(default, deserialize_with = "deserialize_bitrate")]
    pub bitrate: u64,
}

impl AdaptiveFormat {
    /// Whether this format carries audio only
    pub fn is_audio(&self) -> bool {
        self.format_type.starts_with("audio/")
    }
}

/// Details of a single video, reduced to what playback needs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(default)]
    pub adaptive_formats: Vec<AdaptiveFormat>,
}

impl VideoDetails {
    /// The highest-bitrate audio-only format, if any
    pub fn best_audio(&self) -> Option<&AdaptiveFormat> {
        self.adaptive_formats
            .iter()
            .filter(|f| f.is_audio())
            .max_by_key(|f| f.bitrate)
    }
}
