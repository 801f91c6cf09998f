//! Oxcatalog - catalog grouping and reactive state for a desktop music player
//!
//! Turns the library scanner's raw records into display-ready, grouped and
//! sorted buckets, and propagates search and navigation changes to exactly
//! the components that depend on them.

pub mod config;
pub mod error;
pub mod library;
pub mod state;
pub mod ui;

// Re-export key types for convenience
pub use {
    config::{SettingsManager, UserSettings},
    error::{CatalogError, StateError},
    library::{Catalog, DisplayRecord, Group, GroupingKey, RawRecord, group, normalize},
    state::{AppState, Listenable, ListenableView, SelectionState, Subscription},
    ui::{Drawer, LibraryView},
};
