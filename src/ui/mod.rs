//! Headless component layer.
//!
//! Components hold the state they render from and request rebuilds of their
//! own scope; the widget toolkit that draws them lives outside this crate.

pub mod drawer;
pub mod library_view;

pub use {
    drawer::{DRAWER_KEY, Drawer, DrawerEntry},
    library_view::{LIBRARY_VIEW_KEY, LibraryRow, LibraryView},
};
