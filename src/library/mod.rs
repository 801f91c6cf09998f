//! Music catalog management.
//!
//! This module turns scanner output into display-ready records and groups
//! them into headed buckets for the list views.

pub mod catalog;
pub mod grouping;
pub mod models;
pub mod normalizer;

pub use catalog::Catalog;
pub use grouping::{CATCH_ALL_HEADING, group, heading_for};
pub use models::{DisplayRecord, Group, GroupingKey, RawRecord};
pub use normalizer::{TruncationLimits, normalize, normalize_with};
