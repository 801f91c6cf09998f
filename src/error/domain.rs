//! Domain-specific error types using `thiserror`.
//!
//! This module defines the error enums for the catalog (normalization and
//! grouping) and for the reactive state layer.

use thiserror::Error;

/// Catalog-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A raw record lacks a field every consumer relies on.
    #[error("Record is missing required field: {field}")]
    MissingField { field: &'static str },
    /// The requested grouping key names no display field.
    #[error("Unknown grouping key: {key}")]
    UnknownGroupingKey { key: String },
    /// A record in a batch could not be normalized.
    #[error("Invalid record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: Box<CatalogError>,
    },
}

impl CatalogError {
    /// Wraps an error with the position of the offending record in a batch.
    ///
    /// # Arguments
    ///
    /// * `index` - Zero-based index of the record in its batch.
    /// * `source` - The underlying normalization error.
    ///
    /// # Returns
    ///
    /// A new `CatalogError::InvalidRecord`.
    pub fn at_index(index: usize, source: CatalogError) -> Self {
        Self::InvalidRecord {
            index,
            source: Box::new(source),
        }
    }
}

/// Reactive state errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A selection index does not map to a navigation tab.
    #[error("Tab index {index} out of range (have {tab_count} tabs)")]
    TabOutOfRange { index: usize, tab_count: usize },
}
