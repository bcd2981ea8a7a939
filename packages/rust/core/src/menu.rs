//! Expand/collapse state for the navigation menu.
//!
//! One child group may be open per parent. Opening another child under the
//! same parent replaces the entry in `open_child_by_parent`, so two siblings
//! can never be open together. Any navigation resets everything.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MenuState {
    open: bool,
    open_top: BTreeSet<String>,
    open_child_by_parent: BTreeMap<String, String>,
}

impl MenuState {
    /// Fully collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_menu(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open_menu();
        }
    }

    pub fn open_menu(&mut self) {
        self.open = true;
        trace!("menu opened");
    }

    /// Flip one top-level item. Closing it also collapses its open child.
    pub fn toggle(&mut self, top: &str) {
        if self.open_top.remove(top) {
            self.open_child_by_parent.remove(top);
            trace!(top, "top item closed");
        } else {
            self.open = true;
            self.open_top.insert(top.to_owned());
            trace!(top, "top item opened");
        }
    }

    /// Open `child` under `parent`, closing any sibling; close it if already open.
    pub fn toggle_child(&mut self, child: &str, parent: &str) {
        if self.open_child(parent) == Some(child) {
            self.open_child_by_parent.remove(parent);
            trace!(parent, child, "child group closed");
        } else {
            self.open = true;
            self.open_top.insert(parent.to_owned());
            self.open_child_by_parent
                .insert(parent.to_owned(), child.to_owned());
            trace!(parent, child, "child group opened");
        }
    }

    /// A navigation happened: collapse everything.
    pub fn route_changed(&mut self) {
        self.close();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.open_top.clear();
        self.open_child_by_parent.clear();
        trace!("menu closed");
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_top_open(&self, top: &str) -> bool {
        self.open_top.contains(top)
    }

    pub fn open_child(&self, parent: &str) -> Option<&str> {
        self.open_child_by_parent.get(parent).map(String::as_str)
    }

    /// Background scrolling is locked while the menu is open.
    pub fn scroll_locked(&self) -> bool {
        self.open
    }

    /// True when nothing at any level is open.
    pub fn is_collapsed(&self) -> bool {
        !self.open && self.open_top.is_empty() && self.open_child_by_parent.is_empty()
    }

    /// Ids of top-level items currently expanded, in id order.
    pub fn open_tops(&self) -> impl Iterator<Item = &str> {
        self.open_top.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_collapsed() {
        let menu = MenuState::new();
        assert!(menu.is_collapsed());
        assert!(!menu.scroll_locked());
    }

    #[test]
    fn top_items_toggle_independently() {
        let mut menu = MenuState::new();
        menu.toggle("services");
        menu.toggle("truck-type");
        assert!(menu.is_top_open("services"));
        assert!(menu.is_top_open("truck-type"));

        menu.toggle("services");
        assert!(!menu.is_top_open("services"));
        assert!(menu.is_top_open("truck-type"));
    }

    #[test]
    fn one_child_open_per_parent() {
        let mut menu = MenuState::new();
        menu.toggle("areas-we-serve");
        menu.toggle_child("northeast", "areas-we-serve");
        menu.toggle_child("midwest", "areas-we-serve");
        assert_eq!(menu.open_child("areas-we-serve"), Some("midwest"));

        menu.toggle_child("about-our-partners", "about");
        assert_eq!(menu.open_child("about"), Some("about-our-partners"));
        assert_eq!(menu.open_child("areas-we-serve"), Some("midwest"));

        menu.toggle_child("midwest", "areas-we-serve");
        assert_eq!(menu.open_child("areas-we-serve"), None);
    }

    #[test]
    fn closing_top_collapses_its_child() {
        let mut menu = MenuState::new();
        menu.toggle_child("western-us", "areas-we-serve");
        assert!(menu.is_top_open("areas-we-serve"));

        menu.toggle("areas-we-serve");
        assert_eq!(menu.open_child("areas-we-serve"), None);
    }

    #[test]
    fn route_change_collapses_everything() {
        let mut menu = MenuState::new();
        menu.open_menu();
        menu.toggle("about");
        menu.toggle_child("about-our-partners", "about");
        menu.toggle_child("southern-us", "areas-we-serve");
        assert!(menu.scroll_locked());

        menu.route_changed();
        assert!(menu.is_collapsed());
        assert!(!menu.scroll_locked());
    }

    #[test]
    fn toggle_menu_round_trip() {
        let mut menu = MenuState::new();
        menu.toggle_menu();
        assert!(menu.is_open());
        menu.toggle("blog");
        menu.toggle_menu();
        assert!(menu.is_collapsed());
    }
}
