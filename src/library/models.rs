//! Data models for the music catalog.
//!
//! This module defines the raw records produced by the library scanner, the
//! display-ready records derived from them, and the grouped buckets handed to
//! the rendering layer.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Artist and genre value the scanner writes when a tag is absent.
pub const UNKNOWN_SENTINEL: &str = "<unknown>";

/// Album value the scanner writes for files without an album tag.
pub const UNKNOWN_ALBUM_SENTINEL: &str = "audio";

/// A record as produced by the library scanner.
///
/// Every field is optional at the type level so that a library cache with
/// missing keys still deserializes; `title` and `artist` are checked by the
/// normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawRecord {
    /// Track title.
    #[serde(default)]
    pub title: Option<String>,
    /// Track artist.
    #[serde(default)]
    pub artist: Option<String>,
    /// Album title.
    #[serde(default)]
    pub album: Option<String>,
    /// Genre.
    #[serde(default)]
    pub genre: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration_s: Option<f64>,
    /// File system path to the audio file.
    #[serde(default)]
    pub path: Option<String>,
    /// Scanner-assigned identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Whether the track is currently playing.
    #[serde(default)]
    pub now_playing: Option<bool>,
}

/// A display-ready record.
///
/// Built once by the normalizer; all display fields are present and already
/// truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisplayRecord {
    /// Truncated title.
    pub title: String,
    /// Truncated artist.
    pub artist: String,
    /// Truncated album (empty when unknown to the scanner).
    pub album: String,
    /// Truncated genre (empty when unknown to the scanner).
    pub genre: String,
    /// Duration formatted as `M:SS`.
    pub duration: String,
    /// Whether the track is currently playing.
    pub now_playing: bool,
    /// File system path, passed through unmodified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Scanner identifier, passed through unmodified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl DisplayRecord {
    /// Returns the value of the field named by `key`.
    #[must_use]
    pub fn field(&self, key: GroupingKey) -> &str {
        match key {
            GroupingKey::Title => &self.title,
            GroupingKey::Artist => &self.artist,
            GroupingKey::Album => &self.album,
            GroupingKey::Genre => &self.genre,
            GroupingKey::Duration => &self.duration,
        }
    }

    /// Artist as shown to the user.
    #[must_use]
    pub fn display_artist(&self) -> &str {
        if self.artist == UNKNOWN_SENTINEL {
            "Unknown Artist"
        } else {
            &self.artist
        }
    }

    /// Album as shown to the user.
    #[must_use]
    pub fn display_album(&self) -> &str {
        if self.album == UNKNOWN_ALBUM_SENTINEL {
            "Unknown Album"
        } else {
            &self.album
        }
    }

    /// Genre as shown to the user.
    #[must_use]
    pub fn display_genre(&self) -> &str {
        if self.genre == UNKNOWN_SENTINEL {
            "Unknown Genre"
        } else {
            &self.genre
        }
    }
}

/// One headed bucket of a grouping result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Bucket label (a letter, a full field value, or `#`).
    pub heading: String,
    /// Records in this bucket, sorted by the grouping key.
    pub items: Vec<DisplayRecord>,
}

/// Display field used to derive headings and in-bucket order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingKey {
    /// First letter of the title (default).
    #[default]
    Title,
    /// Full artist name.
    Artist,
    /// Full album title.
    Album,
    /// Full genre name.
    Genre,
    /// Formatted duration.
    Duration,
}

impl GroupingKey {
    /// Field name as used in settings and by the scanner.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Genre => "genre",
            Self::Duration => "duration",
        }
    }
}

impl Display for GroupingKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupingKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "artist" => Ok(Self::Artist),
            "album" => Ok(Self::Album),
            "genre" => Ok(Self::Genre),
            "duration" => Ok(Self::Duration),
            _ => Err(CatalogError::UnknownGroupingKey { key: s.to_string() }),
        }
    }
}
