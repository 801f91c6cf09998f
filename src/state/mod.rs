//! Reactive state shared between components.
//!
//! This module provides listenable value cells, the shared tab selection,
//! the search view-model, scoped rebuild requests and the application-root
//! container that wires them together.

pub mod app_state;
pub mod listenable;
pub mod scope;
pub mod search;
pub mod selection;


pub use {
    app_state::AppState,
    listenable::{Listenable, ListenableView, Subscription},
    scope::{ComponentKey, ComponentScope, LoggingScheduler, RebuildScheduler, RecordingScheduler},
    search::{SEARCH_COMPONENT_KEY, SearchState, SearchViewModel},
    selection::{NavTab, SelectionState, SelectionView},
};
