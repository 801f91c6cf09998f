//! Partitioning of display records into headed, sorted buckets.
//!
//! Grouping by title buckets records under the uppercase first letter of the
//! title, with a trailing `#` bucket for everything that does not start with
//! a letter. Grouping by any other field buckets records under the full field
//! value. Buckets are sorted by the grouping field, case-insensitively and
//! stably.

use std::collections::BTreeMap;

use crate::library::models::{DisplayRecord, Group, GroupingKey};

/// Heading for records that fit no other bucket.
pub const CATCH_ALL_HEADING: &str = "#";

/// Groups `records` by `key`.
///
/// # Arguments
///
/// * `records` - Normalized records in scanner order.
/// * `key` - Field deciding both heading and in-bucket order.
///
/// # Returns
///
/// The groups in display order. Empty input yields no groups.
#[must_use]
pub fn group(records: &[DisplayRecord], key: GroupingKey) -> Vec<Group> {
    let mut buckets: BTreeMap<String, Vec<DisplayRecord>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(heading_for(record.field(key), key))
            .or_default()
            .push(record.clone());
    }

    // BTreeMap iteration is already lexicographic; only titles move `#` last.
    let catch_all = if key == GroupingKey::Title {
        buckets.remove(CATCH_ALL_HEADING)
    } else {
        None
    };

    buckets
        .into_iter()
        .chain(catch_all.map(|items| (CATCH_ALL_HEADING.to_string(), items)))
        .map(|(heading, mut items)| {
            items.sort_by_cached_key(|record| record.field(key).to_lowercase());
            Group { heading, items }
        })
        .collect()
}

/// Derives the bucket heading for a single field value.
#[must_use]
pub fn heading_for(value: &str, key: GroupingKey) -> String {
    let value = value.trim();
    if key != GroupingKey::Title {
        return if value.is_empty() {
            CATCH_ALL_HEADING.to_string()
        } else {
            value.to_string()
        };
    }

    let Some(first) = value.chars().next() else {
        return CATCH_ALL_HEADING.to_string();
    };
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(letter @ 'A'..='Z'), None) => letter.to_string(),
        _ => CATCH_ALL_HEADING.to_string(),
    }
}
