//! In-memory catalog of normalized records.
//!
//! The `Catalog` is built once per library scan and is the input to every
//! grouped view. It owns the normalized records and offers filtering and
//! grouping without mutating them.

use std::{fs::read_to_string, path::Path};

use {
    anyhow::Result as AnyhowResult,
    serde_json::from_str,
    tracing::{debug, info},
};

use crate::{
    error::{CatalogError, ErrorReporter, ResultExt},
    library::{
        grouping::group,
        models::{DisplayRecord, Group, GroupingKey, RawRecord},
        normalizer::{TruncationLimits, normalize_with},
    },
};

/// Normalized records in scanner order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<DisplayRecord>,
}

impl Catalog {
    /// Creates a catalog from already normalized records.
    #[must_use]
    pub fn new(records: Vec<DisplayRecord>) -> Self {
        Self { records }
    }

    /// Normalizes every raw record, failing on the first invalid one.
    ///
    /// # Arguments
    ///
    /// * `raw` - Records as produced by the scanner.
    /// * `limits` - Character limits for the text fields.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidRecord` carrying the index of the first
    /// record that lacks a required field.
    pub fn from_raw(raw: &[RawRecord], limits: TruncationLimits) -> Result<Self, CatalogError> {
        let records = raw
            .iter()
            .enumerate()
            .map(|(index, record)| {
                normalize_with(record, limits).map_err(|e| CatalogError::at_index(index, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = records.len(), "Normalized library records");
        Ok(Self { records })
    }

    /// Normalizes every raw record, skipping the invalid ones.
    ///
    /// # Returns
    ///
    /// The catalog and the number of records that were skipped.
    #[must_use]
    pub fn from_raw_lenient(raw: &[RawRecord], limits: TruncationLimits) -> (Self, usize) {
        let mut skipped = 0;
        let records = raw
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match normalize_with(record, limits) {
                Ok(record) => Some(record),
                Err(e) => {
                    ErrorReporter::skipped_record(&CatalogError::at_index(index, e));
                    skipped += 1;
                    None
                }
            })
            .collect::<Vec<_>>();

        debug!(count = records.len(), skipped, "Normalized library records");
        (Self { records }, skipped)
    }

    /// Reads the scanner's JSON library cache.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON array of raw records.
    /// * `limits` - Character limits for the text fields.
    /// * `lenient` - Whether invalid records are skipped instead of failing the load.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a record
    /// is invalid and `lenient` is false.
    pub fn load_json(path: &Path, limits: TruncationLimits, lenient: bool) -> AnyhowResult<Self> {
        let contents =
            read_to_string(path).add_contextf(format!("Reading library cache {}", path.display()))?;
        let raw: Vec<RawRecord> =
            from_str(&contents).add_contextf(format!("Parsing library cache {}", path.display()))?;

        let catalog = if lenient {
            Self::from_raw_lenient(&raw, limits).0
        } else {
            Self::from_raw(&raw, limits)
                .add_contextf(format!("Normalizing library cache {}", path.display()))?
        };

        info!(path = %path.display(), tracks = catalog.len(), "Loaded library cache");
        Ok(catalog)
    }

    /// All records in scanner order.
    #[must_use]
    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Groups all records by `key`.
    #[must_use]
    pub fn grouped(&self, key: GroupingKey) -> Vec<Group> {
        group(&self.records, key)
    }

    /// Records whose title, artist, album or genre contains `query`,
    /// case-insensitively. An empty or blank query matches everything.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<DisplayRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.records.clone();
        }

        self.records
            .iter()
            .filter(|record| {
                [&record.title, &record.artist, &record.album, &record.genre]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    /// Groups the records matching `query` by `key`.
    #[must_use]
    pub fn search_grouped(&self, query: &str, key: GroupingKey) -> Vec<Group> {
        group(&self.filter(query), key)
    }

    /// Marks the record with the given scanner id as playing.
    ///
    /// Every other record is cleared. Passing `None`, or an id no record
    /// has, clears all of them.
    ///
    /// # Returns
    ///
    /// Whether a record was marked.
    pub fn set_now_playing(&mut self, id: Option<&str>) -> bool {
        let mut found = false;
        for record in &mut self.records {
            record.now_playing = id.is_some() && record.id.as_deref() == id;
            found |= record.now_playing;
        }
        found
    }

    /// The record currently marked as playing.
    #[must_use]
    pub fn now_playing(&self) -> Option<&DisplayRecord> {
        self.records.iter().find(|record| record.now_playing)
    }
}
