//! CSV play history log
//!
//! One record per (artist, title) pair, with the matched video id and a
//! play counter. New plays of a known song rewrite the whole file through a
//! temporary file in the same directory, replaced atomically.

use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// One line of the play log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRecord {
    pub artist: String,
    pub title: String,
    /// Platform id of the matched video; empty when unknown
    pub video_id: String,
    /// How often the song was played, at least 1
    pub plays: u32,
}

impl PlayRecord {
    fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            escape_field(&self.artist),
            escape_field(&self.title),
            escape_field(&self.video_id),
            self.plays
        )
    }
}

/// CSV upsert store for play history
///
/// # Example
///
/// ```no_run
/// use vrtplayer::PlayLog;
///
/// let log = PlayLog::new("playlog.csv");
/// let plays = log.record_play("Air", "Sexy Boy", "abc123")?;
/// println!("Played {} time(s)", plays);
/// # Ok::<(), vrtplayer::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PlayLog {
    path: PathBuf,
}

impl PlayLog {
    /// Create a log backed by the given file path
    ///
    /// The file is created lazily on the first recorded play.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path backing this log
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one play of a song, returning the new play count
    ///
    /// An unknown (artist, title) pair is appended with a count of 1. A
    /// known pair has its count incremented, which rewrites the file
    /// through a temporary sibling replaced atomically. The stored video
    /// id of a known pair is kept as is.
    pub fn record_play(&self, artist: &str, title: &str, video_id: &str) -> Result<u32> {
        let mut records = self.entries()?;

        if let Some(record) = records
            .iter_mut()
            .find(|r| r.artist == artist && r.title == title)
        {
            record.plays += 1;
            let plays = record.plays;
            self.rewrite(&records)?;
            debug!(artist, title, plays, "Play count incremented");
            return Ok(plays);
        }

        let record = PlayRecord {
            artist: artist.to_string(),
            title: title.to_string(),
            video_id: video_id.to_string(),
            plays: 1,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record.to_line())?;
        debug!(artist, title, "Play recorded");
        Ok(1)
    }

    /// All records currently in the log
    ///
    /// A missing file reads as an empty log.
    pub fn entries(&self) -> Result<Vec<PlayRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_record)
            .collect()
    }

    /// Rewrite the whole log through a temporary file in the same directory
    fn rewrite(&self, records: &[PlayRecord]) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        for record in records {
            writeln!(tmp, "{}", record.to_line())?;
        }
        tmp.persist(&self.path)?;
        Ok(())
    }
}

/// Quote a field when it contains a separator, quote or newline
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one CSV line into its fields, honouring quoted fields
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}

fn parse_record(line: &str) -> Result<PlayRecord> {
    let fields = split_fields(line);
    if fields.len() != 4 {
        return Err(Error::MalformedRecord(line.to_string()));
    }

    let plays: u32 = fields[3]
        .trim()
        .parse()
        .map_err(|_| Error::MalformedRecord(line.to_string()))?;

    Ok(PlayRecord {
        artist: fields[0].clone(),
        title: fields[1].clone(),
        video_id: fields[2].clone(),
        plays,
    })
}
