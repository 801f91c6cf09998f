//! Application-root state.
//!
//! `AppState` is constructed once at application start. It owns the shared
//! cells (tab selection, search query, grouping key, catalog) and hands each
//! component exactly the access it needs: writers get the cell, dependents
//! get a read-only view.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    config::UserSettings,
    error::CatalogError,
    library::{Catalog, GroupingKey},
    state::{
        listenable::{Listenable, ListenableView},
        scope::{ComponentScope, RebuildScheduler},
        search::{SEARCH_COMPONENT_KEY, SearchViewModel},
        selection::{SelectionState, SelectionView},
    },
    ui::{Drawer, LibraryView},
};

/// Central state container shared by all components.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Active primary view.
    selection: SelectionState,
    /// Search field text.
    search_query: Listenable<String>,
    /// Field the library view groups by.
    grouping_key: Listenable<GroupingKey>,
    /// Normalized library records.
    catalog: Listenable<Arc<Catalog>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selection: SelectionState::new(),
            search_query: Listenable::default(),
            grouping_key: Listenable::default(),
            catalog: Listenable::default(),
        }
    }
}

impl AppState {
    /// Creates the application state from user settings.
    ///
    /// # Arguments
    ///
    /// * `settings` - Loaded user settings.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownGroupingKey` if the configured grouping
    /// key names no display field.
    pub fn new(settings: &UserSettings) -> Result<Self, CatalogError> {
        let grouping_key = settings.grouping_key()?;
        debug!(
            tab = settings.initial_tab,
            key = %grouping_key,
            "Creating application state"
        );

        Ok(Self {
            selection: SelectionState::with_index(settings.initial_tab),
            grouping_key: Listenable::new(grouping_key),
            ..Self::default()
        })
    }

    /// Writable selection, for the component that issues navigation.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Read-only selection, for components that react to navigation.
    #[must_use]
    pub fn selection_view(&self) -> SelectionView {
        self.selection.view()
    }

    /// Read-only search query.
    #[must_use]
    pub fn search_query(&self) -> ListenableView<String> {
        self.search_query.view()
    }

    /// Current grouping key.
    #[must_use]
    pub fn grouping_key(&self) -> GroupingKey {
        self.grouping_key.get()
    }

    /// Changes the grouping key of the library view.
    ///
    /// # Returns
    ///
    /// Whether the key changed.
    pub fn set_grouping_key(&self, key: GroupingKey) -> bool {
        self.grouping_key.set(key)
    }

    /// Current catalog.
    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.get()
    }

    /// Replaces the catalog, as after a library rescan.
    ///
    /// # Returns
    ///
    /// Whether the catalog changed.
    pub fn set_catalog(&self, catalog: Catalog) -> bool {
        info!(tracks = catalog.len(), "Catalog replaced");
        self.catalog.set(Arc::new(catalog))
    }

    /// Marks the track with scanner id `id` as playing.
    ///
    /// # Returns
    ///
    /// Whether a track was marked.
    pub fn mark_now_playing(&self, id: Option<&str>) -> bool {
        let mut catalog = Catalog::clone(&self.catalog.get());
        let found = catalog.set_now_playing(id);
        self.catalog.set(Arc::new(catalog));
        found
    }

    /// Builds the search field view-model over the shared query.
    pub fn create_search_field(&self, scheduler: Arc<dyn RebuildScheduler>) -> SearchViewModel {
        SearchViewModel::new(
            self.search_query.clone(),
            ComponentScope::new(SEARCH_COMPONENT_KEY, scheduler),
        )
    }

    /// Builds the navigation drawer, which owns the search field.
    pub fn create_drawer(&self, scheduler: Arc<dyn RebuildScheduler>) -> Drawer {
        let search = self.create_search_field(Arc::clone(&scheduler));
        Drawer::new(self.selection.clone(), search, scheduler)
    }

    /// Builds the grouped library view.
    pub fn create_library_view(&self, scheduler: Arc<dyn RebuildScheduler>) -> LibraryView {
        LibraryView::new(
            self.selection.view(),
            self.search_query.view(),
            self.grouping_key.view(),
            self.catalog.view(),
            scheduler,
        )
    }
}
