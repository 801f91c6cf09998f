//! Shared tab selection.
//!
//! `SelectionState` is the single source of truth for which primary view is
//! active. It is created once by `AppState` and handed to the components that
//! need it: the writer (the drawer) gets the `SelectionState` itself, readers
//! (content panes) get a `SelectionView`.

use tracing::debug;

use crate::{
    error::StateError,
    state::listenable::{Listenable, ListenableView, Subscription},
};

/// Primary navigation entries, in drawer index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavTab {
    /// Grouped song list (default).
    #[default]
    MusicLibrary,
    /// Landing page.
    Home,
    /// Upcoming tracks.
    PlayQueue,
    /// Saved playlists.
    Playlists,
    /// Preferences.
    Settings,
}

impl NavTab {
    /// Every tab in index order.
    pub const ALL: [NavTab; 5] = [
        NavTab::MusicLibrary,
        NavTab::Home,
        NavTab::PlayQueue,
        NavTab::Playlists,
        NavTab::Settings,
    ];

    /// Maps a selection index to its tab.
    ///
    /// # Errors
    ///
    /// Returns `StateError::TabOutOfRange` for indices past the last tab.
    pub fn from_index(index: usize) -> Result<Self, StateError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(StateError::TabOutOfRange {
                index,
                tab_count: Self::ALL.len(),
            })
    }

    /// Selection index of this tab.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label shown in the drawer.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NavTab::MusicLibrary => "Music library",
            NavTab::Home => "Home",
            NavTab::PlayQueue => "Play queue",
            NavTab::Playlists => "Playlists",
            NavTab::Settings => "Settings",
        }
    }
}

/// Writable tab selection, starting at index 0.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    index: Listenable<usize>,
}

impl SelectionState {
    /// Creates a selection at index 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection at `index`.
    #[must_use]
    pub fn with_index(index: usize) -> Self {
        Self {
            index: Listenable::new(index),
        }
    }

    /// Currently selected index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// Commits a new selection and notifies listeners if it changed.
    ///
    /// # Returns
    ///
    /// Whether the selection changed.
    pub fn set_index(&self, new_index: usize) -> bool {
        let previous = self.index.get();
        let changed = self.index.set(new_index);
        if changed {
            debug!(from = previous, to = new_index, "Selection changed");
        }
        changed
    }

    /// Registers `listener` to run after every selection change.
    pub fn add_listener(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.index.add_listener(listener)
    }

    /// Returns a read-only handle for dependents.
    #[must_use]
    pub fn view(&self) -> SelectionView {
        SelectionView {
            index: self.index.view(),
        }
    }
}

/// Read-only tab selection.
#[derive(Debug, Clone)]
pub struct SelectionView {
    index: ListenableView<usize>,
}

impl SelectionView {
    /// Currently selected index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// Currently selected tab.
    ///
    /// # Errors
    ///
    /// Returns `StateError::TabOutOfRange` if the index names no tab.
    pub fn tab(&self) -> Result<NavTab, StateError> {
        NavTab::from_index(self.index())
    }

    /// Registers `listener` to run after every selection change.
    pub fn add_listener(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.index.add_listener(listener)
    }

    /// Whether this view reads from `selection`.
    #[must_use]
    pub fn observes(&self, selection: &SelectionState) -> bool {
        self.index.observes(&selection.index)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering::SeqCst},
    };

    use crate::{
        error::StateError,
        state::selection::{NavTab, SelectionState},
    };

    #[test]
    fn test_selection_starts_at_zero() {
        let selection = SelectionState::new();
        assert_eq!(selection.index(), 0);
        assert_eq!(selection.view().tab(), Ok(NavTab::MusicLibrary));
    }

    #[test]
    fn test_set_index_notifies_only_on_change() {
        let selection = SelectionState::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let _subscription = selection.add_listener(move || {
            counter.fetch_add(1, SeqCst);
        });

        assert!(!selection.set_index(0));
        assert_eq!(fired.load(SeqCst), 0);

        assert!(selection.set_index(1));
        assert!(!selection.set_index(1));
        assert!(selection.set_index(0));
        assert_eq!(fired.load(SeqCst), 2);
    }

    #[test]
    fn test_view_follows_writer() {
        let selection = SelectionState::new();
        let view = selection.view();
        assert!(view.observes(&selection));
        assert!(!view.observes(&SelectionState::new()));

        let seen = Arc::new(AtomicUsize::new(usize::MAX));
        let sink = Arc::clone(&seen);
        let reader = view.clone();
        let _subscription = view.add_listener(move || sink.store(reader.index(), SeqCst));

        selection.set_index(NavTab::Playlists.index());
        assert_eq!(seen.load(SeqCst), 3);
        assert_eq!(view.tab(), Ok(NavTab::Playlists));
    }

    #[test]
    fn test_isolated_instances() {
        let first = SelectionState::new();
        let second = SelectionState::new();
        first.set_index(2);
        assert_eq!(second.index(), 0);

        let shared = first.clone();
        assert_eq!(shared.index(), 2);
    }

    #[test]
    fn test_nav_tab_mapping() {
        for (index, tab) in NavTab::ALL.iter().enumerate() {
            assert_eq!(tab.index(), index);
            assert_eq!(NavTab::from_index(index), Ok(*tab));
        }
        assert_eq!(NavTab::Home.label(), "Home");
        assert_eq!(NavTab::MusicLibrary.label(), "Music library");
        assert_eq!(
            NavTab::from_index(7),
            Err(StateError::TabOutOfRange {
                index: 7,
                tab_count: 5
            })
        );

        let selection = SelectionState::with_index(9);
        assert!(selection.view().tab().is_err());
    }
}
