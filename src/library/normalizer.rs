//! Conversion of scanner output into display-ready records.

use tracing::warn;

use crate::{
    error::CatalogError,
    library::models::{DisplayRecord, RawRecord},
};

/// Marker appended to truncated fields.
pub const ELLIPSIS: &str = "...";

/// Per-field character limits applied before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationLimits {
    /// Maximum characters kept from a title.
    pub title: usize,
    /// Maximum characters kept from artist, album and genre.
    pub field: usize,
}

impl Default for TruncationLimits {
    fn default() -> Self {
        Self {
            title: 30,
            field: 17,
        }
    }
}

/// Normalizes a raw record with the default truncation limits.
///
/// # Errors
///
/// Returns `CatalogError::MissingField` if `title` or `artist` is absent.
pub fn normalize(raw: &RawRecord) -> Result<DisplayRecord, CatalogError> {
    normalize_with(raw, TruncationLimits::default())
}

/// Normalizes a raw record into a `DisplayRecord`.
///
/// # Arguments
///
/// * `raw` - Record as produced by the scanner.
/// * `limits` - Character limits for the text fields.
///
/// # Errors
///
/// Returns `CatalogError::MissingField` if `title` or `artist` is absent.
pub fn normalize_with(
    raw: &RawRecord,
    limits: TruncationLimits,
) -> Result<DisplayRecord, CatalogError> {
    let title = raw
        .title
        .as_deref()
        .ok_or(CatalogError::MissingField { field: "title" })?;
    let artist = raw
        .artist
        .as_deref()
        .ok_or(CatalogError::MissingField { field: "artist" })?;

    Ok(DisplayRecord {
        title: truncate(title, limits.title),
        artist: truncate(artist, limits.field),
        album: truncate(raw.album.as_deref().unwrap_or_default(), limits.field),
        genre: truncate(raw.genre.as_deref().unwrap_or_default(), limits.field),
        duration: format_duration(raw.duration_s.unwrap_or_default()),
        now_playing: raw.now_playing.unwrap_or(false),
        path: raw.path.clone(),
        id: raw.id.clone(),
    })
}

/// Cuts `value` to `max_chars` characters plus an ellipsis when it is longer.
#[must_use]
pub fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &value[..cut]),
        None => value.to_string(),
    }
}

/// Formats a duration in seconds as `M:SS`.
///
/// Minutes are not rolled over into hours. Negative or non-finite input is
/// treated as zero.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds >= 0.0 {
        seconds
    } else {
        warn!(seconds, "Invalid track duration, showing 0:00");
        0.0
    };

    let minutes = (seconds / 60.0).floor() as u64;
    let rest = (seconds % 60.0).floor() as u64;
    format!("{minutes}:{rest:02}")
}
