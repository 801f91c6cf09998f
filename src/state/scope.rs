//! Scoped rebuild requests.
//!
//! Components never re-render the whole application. Each one owns a
//! `ComponentScope` naming its own subtree, and asks the rendering layer to
//! rebuild only that subtree through a `RebuildScheduler`.

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    sync::Arc,
};

use {parking_lot::Mutex, tracing::debug};

/// Stable identifier of a component subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentKey(String);

impl ComponentKey {
    /// Creates a key from any string-like value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ComponentKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Implemented by the rendering layer to rebuild individual subtrees.
pub trait RebuildScheduler: Send + Sync {
    /// Marks the subtree identified by `component` for rebuilding.
    fn schedule_rebuild(&self, component: &ComponentKey);
}

/// Scheduler that only logs requests, for headless use.
#[derive(Debug, Default)]
pub struct LoggingScheduler;

impl RebuildScheduler for LoggingScheduler {
    fn schedule_rebuild(&self, component: &ComponentKey) {
        debug!(component = %component, "Rebuild requested");
    }
}

/// Scheduler that records every request in order.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    requests: Mutex<Vec<ComponentKey>>,
}

impl RecordingScheduler {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ComponentKey> {
        self.requests.lock().clone()
    }

    /// Number of requests for `component`.
    #[must_use]
    pub fn count_for(&self, component: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|key| key.as_str() == component)
            .count()
    }

    /// Forgets all recorded requests.
    pub fn reset(&self) {
        self.requests.lock().clear();
    }
}

impl RebuildScheduler for RecordingScheduler {
    fn schedule_rebuild(&self, component: &ComponentKey) {
        self.requests.lock().push(component.clone());
    }
}

/// A component's handle for requesting its own rebuild.
#[derive(Clone)]
pub struct ComponentScope {
    key: ComponentKey,
    scheduler: Arc<dyn RebuildScheduler>,
}

impl ComponentScope {
    /// Creates a scope for `key` backed by `scheduler`.
    pub fn new(key: impl Into<String>, scheduler: Arc<dyn RebuildScheduler>) -> Self {
        Self {
            key: ComponentKey::new(key),
            scheduler,
        }
    }

    /// The component this scope rebuilds.
    #[must_use]
    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// Requests a rebuild of this component only.
    pub fn set_state(&self) {
        self.scheduler.schedule_rebuild(&self.key);
    }
}

impl Debug for ComponentScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ComponentScope")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::state::scope::{ComponentScope, RecordingScheduler};

    #[test]
    fn test_scope_rebuilds_only_itself() {
        let scheduler = Arc::new(RecordingScheduler::new());
        let search = ComponentScope::new("search_component", scheduler.clone());
        let drawer = ComponentScope::new("drawer", scheduler.clone());

        search.set_state();
        search.set_state();
        drawer.set_state();

        assert_eq!(scheduler.count_for("search_component"), 2);
        assert_eq!(scheduler.count_for("drawer"), 1);
        assert_eq!(scheduler.requests().len(), 3);
        assert_eq!(scheduler.requests()[2].as_str(), "drawer");

        scheduler.reset();
        assert!(scheduler.requests().is_empty());
    }

    #[test]
    fn test_component_key_display() {
        let scope = ComponentScope::new("music_list_body", Arc::new(RecordingScheduler::new()));
        assert_eq!(scope.key().to_string(), "music_list_body");
        assert!(format!("{scope:?}").contains("music_list_body"));
    }
}
