//! "Pages" screen: browse each registry and preview composed pages.

use crossterm::event::{KeyCode, KeyModifiers};
use dispatchpages_core::page::{ComposedPage, compose_page};
use dispatchpages_core::routes::{PageRef, Resolution, resolve, routes_of_kind};
use dispatchpages_core::schema::JsonLdServiceSchema;
use dispatchpages_sections::{Block as PageBlock, Part};
use dispatchpages_shared::PageKind;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap};
use tracing::{debug, warn};

use super::{Action, Context};

const KINDS: [PageKind; 5] = [
    PageKind::State,
    PageKind::Lane,
    PageKind::TruckType,
    PageKind::Partner,
    PageKind::Index,
];

pub(crate) struct PagesScreen {
    kind: usize,
    routes: Vec<PageRef>,
    selected: usize,
    preview: Option<ComposedPage>,
    scroll: u16,
    status: String,
}

impl PagesScreen {
    pub(crate) fn new(ctx: &Context) -> Self {
        let mut screen = Self {
            kind: 0,
            routes: Vec::new(),
            selected: 0,
            preview: None,
            scroll: 0,
            status: "←/→ category, ↑/↓ select, Enter preview".to_string(),
        };
        screen.load_routes(ctx);
        screen
    }

    fn load_routes(&mut self, ctx: &Context) {
        self.selected = 0;
        self.routes = match routes_of_kind(&ctx.catalog, KINDS[self.kind]) {
            Ok(routes) => routes,
            Err(e) => {
                warn!(error = %e, "could not list routes");
                self.status = format!("Catalog error: {e}");
                Vec::new()
            }
        };
    }

    /// Resolve `path` and preview it, following one redirect.
    pub(crate) fn open(&mut self, ctx: &Context, path: &str) -> Action {
        let page = match resolve(&ctx.catalog, path) {
            Ok(Resolution::Page(page)) => page,
            Ok(Resolution::Redirect(target)) => {
                debug!(from = path, to = %target, "following redirect");
                return match resolve(&ctx.catalog, &target) {
                    Ok(Resolution::Page(page)) => self.show(ctx, page),
                    _ => Action::Status(format!("{path} redirects to {target}")),
                };
            }
            Ok(Resolution::NotFound) => {
                return Action::Status(format!("{path} is not a generated page"));
            }
            Err(e) => return Action::Status(format!("Catalog error: {e}")),
        };
        self.show(ctx, page)
    }

    fn show(&mut self, ctx: &Context, page: PageRef) -> Action {
        if let Some(kind) = KINDS.iter().position(|k| *k == page.kind()) {
            if kind != self.kind {
                self.kind = kind;
                self.load_routes(ctx);
            }
            if let Some(i) = self.routes.iter().position(|r| *r == page) {
                self.selected = i;
            }
        }
        self.compose(ctx, &page)
    }

    fn compose(&mut self, ctx: &Context, page: &PageRef) -> Action {
        let site = &ctx.config.site;
        let schema = JsonLdServiceSchema::from_site(site);
        match compose_page(&ctx.catalog, page, site, &schema) {
            Ok(composed) => {
                self.status = format!(
                    "{}: {} sections, {} skipped",
                    composed.path,
                    composed.blocks.len(),
                    composed.skipped.len()
                );
                self.preview = Some(composed);
                self.scroll = 0;
                Action::None
            }
            Err(e) => Action::Status(format!("Could not compose {}: {e}", page.path())),
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Categories
                Constraint::Min(1),    // Body
                Constraint::Length(1), // Status
            ])
            .split(area);

        let tabs = Tabs::new(KINDS.iter().map(|k| Line::from(k.to_string())).collect::<Vec<_>>())
            .block(Block::default().borders(Borders::ALL).title(" Category "))
            .select(self.kind)
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, rows[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        let items: Vec<ListItem> = self
            .routes
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let style = if i == self.selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == self.selected { "▸ " } else { "  " };
                ListItem::new(format!("{prefix}{}", route.path())).style(style)
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Routes ({}) ", self.routes.len())),
        );
        f.render_widget(list, body[0]);

        let preview = match &self.preview {
            Some(page) => Paragraph::new(preview_lines(page))
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            None => Paragraph::new("Select a route and press Enter.").alignment(Alignment::Center),
        };
        f.render_widget(
            preview.block(Block::default().borders(Borders::ALL).title(" Preview ")),
            body[1],
        );

        let status = Paragraph::new(self.status.as_str()).style(Style::default().fg(Color::DarkGray));
        f.render_widget(status, rows[2]);
    }

    pub(crate) fn handle_key(&mut self, ctx: &Context, code: KeyCode, _modifiers: KeyModifiers) -> Action {
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.kind = (self.kind + KINDS.len() - 1) % KINDS.len();
                self.load_routes(ctx);
                Action::None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.kind = (self.kind + 1) % KINDS.len();
                self.load_routes(ctx);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.routes.len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                Action::None
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(10);
                Action::None
            }
            KeyCode::Enter => match self.routes.get(self.selected).cloned() {
                Some(route) => self.compose(ctx, &route),
                None => Action::None,
            },
            _ => Action::None,
        }
    }
}

/// Section outline of a composed page.
fn preview_lines(page: &ComposedPage) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::styled(page.title.clone(), bold),
        Line::styled(page.path.clone(), Style::default().fg(Color::DarkGray)),
        Line::from(""),
    ];

    for block in &page.blocks {
        lines.push(Line::from(vec![
            Span::styled(format!("■ {:<22}", block.id), Style::default().fg(Color::Cyan)),
            Span::raw(block.heading.clone()),
        ]));
        if let Some(summary) = block_summary(block) {
            lines.push(Line::from(format!("    {summary}")));
        }
    }

    if !page.skipped.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::styled("Skipped (nothing to show)", bold));
        for id in &page.skipped {
            lines.push(Line::styled(format!("  □ {id}"), Style::default().fg(Color::DarkGray)));
        }
    }

    if page.schema.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::styled("Structured data: Service", Style::default().fg(Color::Green)));
    }
    lines
}

fn block_summary(block: &PageBlock) -> Option<String> {
    let count = block.item_count();
    if count > 0 {
        return Some(format!("{count} item(s)"));
    }
    block.parts.iter().find_map(|part| match part {
        Part::Paragraph { text } => Some(truncate(text, 70)),
        _ => None,
    })
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_owned()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}…")
    }
}
