//! Error handling using `thiserror` and `anyhow`.
//!
//! This module provides domain-specific error types for precise error
//! handling and operational context propagation for reporting.

pub mod domain;
pub mod operational;

pub use {
    domain::{CatalogError, StateError},
    operational::{ErrorReporter, ResultExt},
};
