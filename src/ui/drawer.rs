//! Navigation drawer.
//!
//! The drawer is the only component that writes the tab selection. It also
//! hosts the search field, whose view-model rebuilds its own scope and never
//! the drawer's.

use std::sync::Arc;

use tracing::debug;

use crate::{
    error::StateError,
    state::{
        listenable::Subscription,
        scope::{ComponentScope, RebuildScheduler},
        search::SearchViewModel,
        selection::{NavTab, SelectionState},
    },
};

/// Component key of the drawer.
pub const DRAWER_KEY: &str = "drawer";

/// One navigation button as the renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawerEntry {
    /// Tab the button selects.
    pub tab: NavTab,
    /// Button text.
    pub label: &'static str,
    /// Whether the button is highlighted.
    pub active: bool,
}

/// Navigation drawer component.
#[derive(Debug)]
pub struct Drawer {
    selection: SelectionState,
    search: SearchViewModel,
    scope: ComponentScope,
    _subscription: Subscription,
}

impl Drawer {
    /// Creates the drawer.
    ///
    /// # Arguments
    ///
    /// * `selection` - Shared selection; the drawer is its writer.
    /// * `search` - View-model of the embedded search field.
    /// * `scheduler` - Rendering layer's rebuild scheduler.
    pub fn new(
        selection: SelectionState,
        search: SearchViewModel,
        scheduler: Arc<dyn RebuildScheduler>,
    ) -> Self {
        let scope = ComponentScope::new(DRAWER_KEY, scheduler);

        // Button highlighting follows the selection.
        let subscription = {
            let scope = scope.clone();
            selection.add_listener(move || scope.set_state())
        };

        Self {
            selection,
            search,
            scope,
            _subscription: subscription,
        }
    }

    /// Handles a press on the button for `tab`.
    ///
    /// # Returns
    ///
    /// Whether the selection changed.
    pub fn press(&self, tab: NavTab) -> bool {
        debug!(tab = tab.label(), "Drawer entry pressed");
        self.selection.set_index(tab.index())
    }

    /// Currently selected tab.
    ///
    /// # Errors
    ///
    /// Returns `StateError::TabOutOfRange` if the selection names no tab.
    pub fn active_tab(&self) -> Result<NavTab, StateError> {
        NavTab::from_index(self.selection.index())
    }

    /// Whether `tab` is the selected one.
    #[must_use]
    pub fn is_active(&self, tab: NavTab) -> bool {
        self.selection.index() == tab.index()
    }

    /// Buttons in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<DrawerEntry> {
        let selected = self.selection.index();
        NavTab::ALL
            .iter()
            .map(|&tab| DrawerEntry {
                tab,
                label: tab.label(),
                active: tab.index() == selected,
            })
            .collect()
    }

    /// The embedded search field.
    #[must_use]
    pub fn search(&self) -> &SearchViewModel {
        &self.search
    }

    /// Scope rebuilt on selection changes.
    #[must_use]
    pub fn scope(&self) -> &ComponentScope {
        &self.scope
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        state::{
            NavTab, RecordingScheduler, SEARCH_COMPONENT_KEY, SelectionState,
            listenable::Listenable, scope::ComponentScope, search::SearchViewModel,
        },
        ui::drawer::{DRAWER_KEY, Drawer},
    };

    fn drawer() -> (Drawer, SelectionState, Arc<RecordingScheduler>) {
        let scheduler = Arc::new(RecordingScheduler::new());
        let selection = SelectionState::new();
        let search = SearchViewModel::new(
            Listenable::default(),
            ComponentScope::new(SEARCH_COMPONENT_KEY, scheduler.clone()),
        );
        let drawer = Drawer::new(selection.clone(), search, scheduler.clone());
        (drawer, selection, scheduler)
    }

    #[test]
    fn test_press_commits_selection() {
        let (drawer, selection, scheduler) = drawer();
        assert_eq!(drawer.active_tab(), Ok(NavTab::MusicLibrary));

        assert!(drawer.press(NavTab::Home));
        assert_eq!(selection.index(), 1);
        assert!(drawer.is_active(NavTab::Home));
        assert_eq!(scheduler.count_for(DRAWER_KEY), 1);

        assert!(!drawer.press(NavTab::Home));
        assert_eq!(scheduler.count_for(DRAWER_KEY), 1);
    }

    #[test]
    fn test_entries_highlight_selected_tab() {
        let (drawer, selection, _scheduler) = drawer();
        selection.set_index(NavTab::PlayQueue.index());

        let entries = drawer.entries();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].label, "Music library");
        let active: Vec<NavTab> = entries.iter().filter(|e| e.active).map(|e| e.tab).collect();
        assert_eq!(active, vec![NavTab::PlayQueue]);
    }

    #[test]
    fn test_search_typing_does_not_rebuild_drawer() {
        let (drawer, _selection, scheduler) = drawer();
        drawer.search().set_text("black");
        drawer.search().set_text("black sabbath");
        drawer.search().clear();

        assert_eq!(scheduler.count_for(SEARCH_COMPONENT_KEY), 2);
        assert_eq!(scheduler.count_for(DRAWER_KEY), 0);
        assert_eq!(drawer.scope().key().as_str(), DRAWER_KEY);
    }
}
