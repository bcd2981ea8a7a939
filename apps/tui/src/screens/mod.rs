//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its
//! own state and rendering logic. Screens read the shared [`Context`] and
//! talk back to the app through [`Action`].

mod build;
mod menu;
mod pages;

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};
use dispatchpages_registry::Catalog;
use dispatchpages_shared::AppConfig;
use ratatui::prelude::*;

pub(crate) use build::BuildScreen;
pub(crate) use menu::MenuScreen;
pub(crate) use pages::PagesScreen;

/// Data every screen reads.
pub(crate) struct Context {
    pub config: AppConfig,
    pub catalog: Catalog,
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    /// Show this message in the status bar.
    Status(String),
    /// Switch to the pages screen and preview this path.
    Open(String),
}

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Menu,
    Pages,
    Build,
}

impl ScreenId {
    pub(crate) const ALL: [ScreenId; 3] = [Self::Menu, Self::Pages, Self::Build];
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu => write!(f, "Menu"),
            Self::Pages => write!(f, "Pages"),
            Self::Build => write!(f, "Build"),
        }
    }
}

/// All screen states, one per tab.
pub(crate) struct Screens {
    pub menu: MenuScreen,
    pub pages: PagesScreen,
    pub build: BuildScreen,
}

impl Screens {
    pub(crate) fn new(ctx: &Context) -> Self {
        Self {
            menu: MenuScreen::new(ctx),
            pages: PagesScreen::new(ctx),
            build: BuildScreen::new(ctx),
        }
    }

    pub(crate) fn draw(&self, id: ScreenId, f: &mut Frame, area: Rect) {
        match id {
            ScreenId::Menu => self.menu.draw(f, area),
            ScreenId::Pages => self.pages.draw(f, area),
            ScreenId::Build => self.build.draw(f, area),
        }
    }

    pub(crate) fn handle_key(
        &mut self,
        id: ScreenId,
        ctx: &Context,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> Action {
        match id {
            ScreenId::Menu => self.menu.handle_key(code, modifiers),
            ScreenId::Pages => self.pages.handle_key(ctx, code, modifiers),
            ScreenId::Build => self.build.handle_key(ctx, code, modifiers),
        }
    }
}
