//! Operational error context propagation with `anyhow`.
//!
//! This module provides extension traits and utilities for attaching
//! context to catalog and settings failures and for reporting them.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::{Context, Error, Result as AnyhowResult},
    tracing::{error, warn},
};

use crate::error::domain::CatalogError;

/// Extension trait for enhanced error context.
pub trait ResultExt<T, E> {
    /// Adds context to an error with a static string.
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;

    /// Adds context to an error with a formatted string.
    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(context)
    }

    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(format.to_string())
    }
}

/// Centralized error reporting and logging.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Reports a record that was dropped from a lenient catalog load.
    pub fn skipped_record(error: &CatalogError) {
        warn!(error = %error, "Skipping library record");
    }

    /// Reports an error that aborts the current operation.
    pub fn error(error: &Error, context: &str) {
        error!(context = context, error = %format!("{error:#}"), "Operation failed");
    }

    /// Converts an error to a user-friendly message.
    ///
    /// Catalog errors are phrased in terms of the scanned library; anything
    /// else is rendered with its full context chain.
    pub fn to_user_message(error: &Error) -> String {
        match error.downcast_ref::<CatalogError>() {
            Some(CatalogError::InvalidRecord { index, source }) => {
                format!("Library entry #{} is unusable ({source}). Try rescanning the library.", index + 1)
            }
            Some(CatalogError::MissingField { field }) => {
                format!("A library entry has no {field}. Try rescanning the library.")
            }
            _ => format!("{error:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Error as IoError, ErrorKind::NotFound};

    use anyhow::anyhow;

    use crate::error::{
        domain::CatalogError,
        operational::{ErrorReporter, ResultExt},
    };

    #[test]
    fn test_result_ext_with_context() {
        let result: Result<(), IoError> = Err(IoError::new(NotFound, "gone"));
        let error = result.add_context("Reading library cache").unwrap_err();
        assert_eq!(error.to_string(), "Reading library cache");
        assert_eq!(format!("{error:#}"), "Reading library cache: gone");
    }

    #[test]
    fn test_result_ext_with_contextf() {
        let result: Result<(), CatalogError> = Err(CatalogError::MissingField { field: "title" });
        let error = result.add_contextf(format_args!("Loading {}", "cache.json")).unwrap_err();
        assert!(error.to_string().contains("Loading cache.json"));
        assert!(error.downcast_ref::<CatalogError>().is_some());
    }

    #[test]
    fn test_user_message_for_invalid_record() {
        let error = anyhow::Error::new(CatalogError::at_index(
            0,
            CatalogError::MissingField { field: "artist" },
        ));
        assert_eq!(
            ErrorReporter::to_user_message(&error),
            "Library entry #1 is unusable (Record is missing required field: artist). Try rescanning the library."
        );
    }

    #[test]
    fn test_user_message_falls_back_to_chain() {
        let error = anyhow!("disk on fire").context("Saving settings");
        assert_eq!(
            ErrorReporter::to_user_message(&error),
            "Saving settings: disk on fire"
        );
    }
}
