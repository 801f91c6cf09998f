//! Grouped song list (content pane).
//!
//! The `LibraryView` reads the shared selection, search query, grouping key
//! and catalog through read-only views. Whenever one of them changes it
//! recomputes its groups and asks for a rebuild of its own scope only. While
//! another tab is active it does no grouping work.

use std::{
    iter::once,
    sync::{Arc, Weak},
};

use {parking_lot::RwLock, tracing::debug};

use crate::{
    library::{Catalog, DisplayRecord, Group, GroupingKey},
    state::{
        listenable::{ListenableView, Subscription},
        scope::{ComponentScope, RebuildScheduler},
        selection::{NavTab, SelectionView},
    },
};

/// Component key of the library view.
pub const LIBRARY_VIEW_KEY: &str = "music_list_body";

/// One row of the flattened list: a heading followed by its tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryRow {
    /// Bucket heading.
    Heading(String),
    /// Track under the preceding heading.
    Track(DisplayRecord),
}

struct Inner {
    selection: SelectionView,
    query: ListenableView<String>,
    grouping_key: ListenableView<GroupingKey>,
    catalog: ListenableView<Arc<Catalog>>,
    groups: RwLock<Vec<Group>>,
    scope: ComponentScope,
}

impl Inner {
    fn is_active(&self) -> bool {
        self.selection.tab() == Ok(NavTab::MusicLibrary)
    }

    /// Recomputes the groups; returns whether they changed.
    fn regroup(&self) -> bool {
        let query = self.query.get();
        let key = self.grouping_key.get();
        let groups = self
            .catalog
            .with(|catalog| catalog.search_grouped(&query, key));

        let mut current = self.groups.write();
        if *current == groups {
            return false;
        }
        debug!(
            key = %key,
            query = %query,
            groups = groups.len(),
            "Library view regrouped"
        );
        *current = groups;
        true
    }

    fn on_selection_changed(&self) {
        if self.is_active() {
            self.regroup();
        }
        // The pane swaps its content on every tab change.
        self.scope.set_state();
    }

    fn on_input_changed(&self) {
        if self.is_active() && self.regroup() {
            self.scope.set_state();
        }
    }
}

/// Grouped song list component.
pub struct LibraryView {
    inner: Arc<Inner>,
    _subscriptions: Vec<Subscription>,
}

impl LibraryView {
    /// Creates the view and computes its initial groups.
    ///
    /// # Arguments
    ///
    /// * `selection` - Shared tab selection.
    /// * `query` - Search query text.
    /// * `grouping_key` - Field to group by.
    /// * `catalog` - Normalized library.
    /// * `scheduler` - Rendering layer's rebuild scheduler.
    pub fn new(
        selection: SelectionView,
        query: ListenableView<String>,
        grouping_key: ListenableView<GroupingKey>,
        catalog: ListenableView<Arc<Catalog>>,
        scheduler: Arc<dyn RebuildScheduler>,
    ) -> Self {
        let inner = Arc::new(Inner {
            selection,
            query,
            grouping_key,
            catalog,
            groups: RwLock::new(Vec::new()),
            scope: ComponentScope::new(LIBRARY_VIEW_KEY, scheduler),
        });
        if inner.is_active() {
            inner.regroup();
        }

        let on_selection = listener(&inner, Inner::on_selection_changed);
        let subscriptions = vec![
            inner.selection.add_listener(on_selection),
            inner.query.add_listener(listener(&inner, Inner::on_input_changed)),
            inner
                .grouping_key
                .add_listener(listener(&inner, Inner::on_input_changed)),
            inner
                .catalog
                .add_listener(listener(&inner, Inner::on_input_changed)),
        ];

        Self {
            inner,
            _subscriptions: subscriptions,
        }
    }

    /// Current groups.
    #[must_use]
    pub fn groups(&self) -> Vec<Group> {
        self.inner.groups.read().clone()
    }

    /// Current headings, in display order.
    #[must_use]
    pub fn headings(&self) -> Vec<String> {
        self.inner
            .groups
            .read()
            .iter()
            .map(|group| group.heading.clone())
            .collect()
    }

    /// Groups flattened into heading and track rows.
    #[must_use]
    pub fn rows(&self) -> Vec<LibraryRow> {
        self.inner
            .groups
            .read()
            .iter()
            .flat_map(|group| {
                once(LibraryRow::Heading(group.heading.clone()))
                    .chain(group.items.iter().cloned().map(LibraryRow::Track))
            })
            .collect()
    }

    /// Whether the library tab is the selected one.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Scope rebuilt when the view changes.
    #[must_use]
    pub fn scope(&self) -> &ComponentScope {
        &self.inner.scope
    }
}

/// Wraps a handler so the subscription does not keep the view alive.
fn listener(inner: &Arc<Inner>, handler: fn(&Inner)) -> impl Fn() + Send + Sync + 'static {
    let weak: Weak<Inner> = Arc::downgrade(inner);
    move || {
        if let Some(inner) = weak.upgrade() {
            handler(&inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        library::{Catalog, DisplayRecord, GroupingKey},
        state::{Listenable, NavTab, RecordingScheduler, SelectionState},
        ui::library_view::{LIBRARY_VIEW_KEY, LibraryRow, LibraryView},
    };

    struct Fixture {
        selection: SelectionState,
        query: Listenable<String>,
        key: Listenable<GroupingKey>,
        catalog: Listenable<Arc<Catalog>>,
        scheduler: Arc<RecordingScheduler>,
        view: LibraryView,
    }

    fn song(title: &str, artist: &str) -> DisplayRecord {
        DisplayRecord {
            title: title.to_string(),
            artist: artist.to_string(),
            ..DisplayRecord::default()
        }
    }

    fn fixture() -> Fixture {
        let selection = SelectionState::new();
        let query = Listenable::<String>::default();
        let key = Listenable::new(GroupingKey::Title);
        let catalog = Listenable::new(Arc::new(Catalog::new(vec![
            song("aaah!", "Slipknot"),
            song("Back in Black", "AC/DC"),
            song("3 Doors", "Unknown"),
        ])));
        let scheduler = Arc::new(RecordingScheduler::new());
        let view = LibraryView::new(
            selection.view(),
            query.view(),
            key.view(),
            catalog.view(),
            scheduler.clone(),
        );
        Fixture {
            selection,
            query,
            key,
            catalog,
            scheduler,
            view,
        }
    }

    #[test]
    fn test_initial_groups() {
        let f = fixture();
        assert!(f.view.is_active());
        assert_eq!(f.view.headings(), vec!["A", "B", "#"]);
        assert!(f.scheduler.requests().is_empty());
    }

    #[test]
    fn test_rows_interleave_headings_and_tracks() {
        let f = fixture();
        let rows = f.view.rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], LibraryRow::Heading("A".to_string()));
        assert!(matches!(&rows[1], LibraryRow::Track(r) if r.title == "aaah!"));
        assert_eq!(rows[4], LibraryRow::Heading("#".to_string()));
    }

    #[test]
    fn test_grouping_key_change_regroups() {
        let f = fixture();
        f.key.set(GroupingKey::Artist);
        assert_eq!(f.view.headings(), vec!["AC/DC", "Slipknot", "Unknown"]);
        assert_eq!(f.scheduler.count_for(LIBRARY_VIEW_KEY), 1);
    }

    #[test]
    fn test_query_filters_and_skips_redundant_rebuilds() {
        let f = fixture();
        f.query.set("back".to_string());
        assert_eq!(f.view.headings(), vec!["B"]);
        assert_eq!(f.scheduler.count_for(LIBRARY_VIEW_KEY), 1);

        // Same result set, so nothing to rebuild.
        f.query.set("back in".to_string());
        assert_eq!(f.scheduler.count_for(LIBRARY_VIEW_KEY), 1);
    }

    #[test]
    fn test_inactive_tab_defers_work() {
        let f = fixture();
        f.selection.set_index(NavTab::Home.index());
        assert!(!f.view.is_active());
        assert_eq!(f.scheduler.count_for(LIBRARY_VIEW_KEY), 1);

        f.key.set(GroupingKey::Artist);
        f.catalog.set(Arc::new(Catalog::new(vec![song("Yellow", "Coldplay")])));
        assert_eq!(f.scheduler.count_for(LIBRARY_VIEW_KEY), 1);
        assert_eq!(f.view.headings(), vec!["A", "B", "#"]);

        f.selection.set_index(NavTab::MusicLibrary.index());
        assert_eq!(f.view.headings(), vec!["Coldplay"]);
        assert_eq!(f.scheduler.count_for(LIBRARY_VIEW_KEY), 2);
    }

    #[test]
    fn test_dropping_view_releases_subscriptions() {
        let f = fixture();
        assert_eq!(f.query.listener_count(), 1);
        drop(f.view);
        assert_eq!(f.query.listener_count(), 0);
        assert_eq!(f.selection.view().index(), 0);
    }
}
