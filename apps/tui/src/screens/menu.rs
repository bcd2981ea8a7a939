//! "Menu" screen: the site navigation driven by [`MenuState`].

use crossterm::event::{KeyCode, KeyModifiers};
use dispatchpages_core::menu::MenuState;
use dispatchpages_core::navigation::{NavItem, navigation};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use tracing::{debug, warn};

use super::{Action, Context};

/// One visible line of the expanded tree.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    depth: usize,
    id: String,
    label: String,
    href: String,
    /// Id of the top-level item this row sits under.
    top: String,
    has_children: bool,
}

pub(crate) struct MenuScreen {
    tree: Vec<NavItem>,
    state: MenuState,
    selected: usize,
    status: String,
}

impl MenuScreen {
    pub(crate) fn new(ctx: &Context) -> Self {
        let (tree, status) = match navigation(&ctx.catalog) {
            Ok(tree) => (tree, "Press 'm' to open the menu.".to_string()),
            Err(e) => {
                warn!(error = %e, "navigation tree unavailable");
                (Vec::new(), format!("Navigation unavailable: {e}"))
            }
        };
        Self {
            tree,
            state: MenuState::new(),
            selected: 0,
            status,
        }
    }

    /// Rows visible under the current menu state.
    fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        if !self.state.is_open() {
            return rows;
        }
        for top in &self.tree {
            rows.push(row(top, 0, &top.id));
            if !self.state.is_top_open(&top.id) {
                continue;
            }
            for child in &top.children {
                rows.push(row(child, 1, &top.id));
                if self.state.open_child(&top.id) == Some(child.id.as_str()) {
                    rows.extend(child.children.iter().map(|leaf| row(leaf, 2, &top.id)));
                }
            }
        }
        rows
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // Tree
                Constraint::Length(3), // Status
            ])
            .split(area);

        let rows = self.rows();
        if rows.is_empty() {
            let closed = Paragraph::new("Menu closed.\n\nPress 'm' or Enter to open it.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Navigation "));
            f.render_widget(closed, chunks[0]);
        } else {
            let items: Vec<ListItem> = rows
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    let style = if i == self.selected {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    let marker = match (r.has_children, self.is_expanded(r)) {
                        (true, true) => "▾ ",
                        (true, false) => "▸ ",
                        (false, _) => "  ",
                    };
                    let cursor = if i == self.selected { "›" } else { " " };
                    ListItem::new(format!(
                        "{cursor}{:indent$}{marker}{}  {}",
                        "",
                        r.label,
                        r.href,
                        indent = r.depth * 2
                    ))
                    .style(style)
                })
                .collect();

            let title = if self.state.scroll_locked() {
                " Navigation (scroll locked) "
            } else {
                " Navigation "
            };
            let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(list, chunks[0]);
        }

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[1]);
    }

    fn is_expanded(&self, row: &Row) -> bool {
        match row.depth {
            0 => self.state.is_top_open(&row.id),
            1 => self.state.open_child(&row.top) == Some(row.id.as_str()),
            _ => false,
        }
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> Action {
        match code {
            KeyCode::Char('m') => {
                self.state.toggle_menu();
                self.selected = 0;
                Action::None
            }
            KeyCode::Esc => {
                self.state.close();
                self.selected = 0;
                Action::Status("Menu closed".to_string())
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.rows().len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            _ => Action::None,
        }
    }

    /// Expand, collapse, or follow the selected row.
    fn activate(&mut self) -> Action {
        if !self.state.is_open() {
            self.state.open_menu();
            self.selected = 0;
            return Action::None;
        }

        let Some(row) = self.rows().get(self.selected).cloned() else {
            return Action::None;
        };

        if row.has_children {
            match row.depth {
                0 => self.state.toggle(&row.id),
                _ => self.state.toggle_child(&row.id, &row.top),
            }
            self.clamp_selection();
            return Action::None;
        }

        debug!(href = %row.href, "menu link followed");
        self.state.route_changed();
        self.selected = 0;
        self.status = format!("Opened {}", row.label);
        Action::Open(row.href)
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

fn row(item: &NavItem, depth: usize, top: &str) -> Row {
    Row {
        depth,
        id: item.id.clone(),
        label: item.label.clone(),
        href: item.href.clone(),
        top: top.to_owned(),
        has_children: item.has_children(),
    }
}

#[cfg(test)]
mod tests {
    use dispatchpages_registry::Catalog;
    use dispatchpages_shared::AppConfig;

    use super::*;

    fn screen() -> MenuScreen {
        MenuScreen::new(&Context {
            config: AppConfig::default(),
            catalog: Catalog::builtin(),
        })
    }

    fn select(screen: &mut MenuScreen, id: &str) {
        screen.selected = screen
            .rows()
            .iter()
            .position(|r| r.id == id)
            .unwrap_or_else(|| panic!("row {id} not visible"));
    }

    #[test]
    fn closed_menu_shows_nothing() {
        let screen = screen();
        assert!(screen.rows().is_empty());
    }

    #[test]
    fn expanding_reveals_children_and_grandchildren() {
        let mut screen = screen();
        screen.handle_key(KeyCode::Char('m'), KeyModifiers::NONE);
        let tops = screen.rows().len();
        assert_eq!(tops, screen.tree.len());

        select(&mut screen, "areas-we-serve");
        screen.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(screen.rows().len(), tops + 4);

        select(&mut screen, "midwest");
        screen.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(screen.rows().len(), tops + 4 + 12);
        assert!(screen.rows().iter().any(|r| r.depth == 2));
    }

    #[test]
    fn following_a_leaf_resets_the_menu() {
        let mut screen = screen();
        screen.handle_key(KeyCode::Char('m'), KeyModifiers::NONE);
        select(&mut screen, "truck-type");
        screen.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        select(&mut screen, "reefer");

        let action = screen.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(action, Action::Open("/truck-type/reefer".to_string()));
        assert!(!screen.state.is_open());
        assert!(screen.rows().is_empty());
    }
}
