//! View-model for the search field.
//!
//! The query text lives in a `Listenable<String>`. The view-model tracks
//! whether the field is populated and rebuilds the search component only
//! when that flips, so typing inside a non-empty field costs no rebuild.

use std::sync::Arc;

use {parking_lot::Mutex, tracing::debug};

use crate::state::{
    listenable::{Listenable, ListenableView, Subscription},
    scope::ComponentScope,
};

/// Component key of the search field.
pub const SEARCH_COMPONENT_KEY: &str = "search_component";

/// Whether the search field holds any text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No text (default). The clear button is hidden.
    #[default]
    Empty,
    /// Some text. The clear button is shown.
    Populated,
}

impl SearchState {
    fn for_text(text: &str) -> Self {
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Populated
        }
    }
}

/// Search field view-model.
#[derive(Debug)]
pub struct SearchViewModel {
    query: Listenable<String>,
    state: Arc<Mutex<SearchState>>,
    scope: ComponentScope,
    _subscription: Subscription,
}

impl SearchViewModel {
    /// Creates a view-model over an existing query cell.
    ///
    /// # Arguments
    ///
    /// * `query` - Query text, shared with whoever filters on it.
    /// * `scope` - Scope of the component that owns the search field.
    pub fn new(query: Listenable<String>, scope: ComponentScope) -> Self {
        let state = Arc::new(Mutex::new(query.with(|text| SearchState::for_text(text))));

        let subscription = {
            let reader = query.view();
            let state = Arc::clone(&state);
            let scope = scope.clone();
            query.add_listener(move || {
                let next = reader.with(|text| SearchState::for_text(text));
                let flipped = {
                    let mut current = state.lock();
                    let flipped = *current != next;
                    *current = next;
                    flipped
                };

                if flipped {
                    debug!(component = %scope.key(), state = ?next, "Search state flipped");
                    scope.set_state();
                }
            })
        };

        Self {
            query,
            state,
            scope,
            _subscription: subscription,
        }
    }

    /// Current query text.
    #[must_use]
    pub fn text(&self) -> String {
        self.query.get()
    }

    /// Replaces the query text, as typing does.
    ///
    /// # Returns
    ///
    /// Whether the text changed.
    pub fn set_text(&self, text: impl Into<String>) -> bool {
        self.query.set(text.into())
    }

    /// Empties the field, as the clear button does.
    pub fn clear(&self) -> bool {
        self.query.clear()
    }

    /// Whether the field holds any text.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.state() == SearchState::Populated
    }

    /// Current field state.
    #[must_use]
    pub fn state(&self) -> SearchState {
        *self.state.lock()
    }

    /// Read-only query for components that filter on it.
    #[must_use]
    pub fn query(&self) -> ListenableView<String> {
        self.query.view()
    }

    /// Scope rebuilt on state flips.
    #[must_use]
    pub fn scope(&self) -> &ComponentScope {
        &self.scope
    }
}
