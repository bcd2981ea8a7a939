//! Core TUI application state and event loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dispatchpages_registry::Catalog;
use dispatchpages_shared::load_config;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use tracing::info;

use crate::screens::{Action, Context, ScreenId, Screens};
use crate::widgets::{centered_rect, status_bar};

/// Application state.
pub(crate) struct App {
    pub ctx: Context,
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
    pub screens: Screens,
}

impl App {
    pub(crate) fn new(ctx: Context) -> Self {
        let screens = Screens::new(&ctx);
        Self {
            ctx,
            active_tab: 0,
            should_quit: false,
            status: "Ready. Press ? for help".to_string(),
            show_help: false,
            screens,
        }
    }

    fn current(&self) -> ScreenId {
        ScreenId::ALL[self.active_tab]
    }

    fn select_tab(&mut self, idx: usize) {
        self.active_tab = idx;
        self.status = self.current().to_string();
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Status(msg) => self.status = msg,
            Action::Open(path) => {
                let action = self.screens.pages.open(&self.ctx, &path);
                if let Some(idx) = ScreenId::ALL.iter().position(|s| *s == ScreenId::Pages) {
                    self.active_tab = idx;
                }
                self.status = match action {
                    Action::Status(msg) => msg,
                    _ => format!("Previewing {path}"),
                };
            }
        }
    }
}

/// Entry point: sets up terminal, runs event loop, restores terminal.
pub(crate) fn run() -> Result<()> {
    let config = load_config()?;
    let catalog = match &config.catalog.states_dir {
        Some(dir) => Catalog::with_states_dir(dir),
        None => Catalog::builtin(),
    };
    let stats = catalog.initialize()?;
    info!(
        states = stats.states,
        lanes = stats.lanes,
        truck_types = stats.truck_types,
        partners = stats.partners,
        "tui starting"
    );

    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(Context { config, catalog }));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        KeyCode::Char(c @ '1'..='3') => {
            let idx = (c as usize) - ('1' as usize);
            if idx < ScreenId::ALL.len() {
                app.select_tab(idx);
            }
            return;
        }
        KeyCode::Tab => {
            app.select_tab((app.active_tab + 1) % ScreenId::ALL.len());
            return;
        }
        KeyCode::BackTab => {
            let len = ScreenId::ALL.len();
            app.select_tab((app.active_tab + len - 1) % len);
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    let id = app.current();
    let action = app.screens.handle_key(id, &app.ctx, code, modifiers);
    app.apply(action);
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let tab_titles: Vec<Line> = ScreenId::ALL
        .iter()
        .map(|s| Line::from(s.to_string()))
        .collect();

    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", app.ctx.config.site.company_name)),
        )
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    app.screens.draw(app.current(), f, chunks[1]);

    f.render_widget(status_bar(&app.status), chunks[2]);

    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  1-3          Switch to screen"),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Menu:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  m            Open / close the menu"),
        Line::from("  Enter        Expand item or follow link"),
        Line::from("  Esc          Close menu"),
        Line::from(""),
        Line::from("Pages:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ←/→          Change category"),
        Line::from("  Enter        Preview page"),
        Line::from("  PgUp/PgDn    Scroll preview"),
        Line::from(""),
        Line::from("Build:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  b / v / a    Build, verify, audit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (press any key to close) ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use dispatchpages_shared::AppConfig;

    use super::*;

    fn app() -> App {
        App::new(Context {
            config: AppConfig::default(),
            catalog: Catalog::builtin(),
        })
    }

    #[test]
    fn tab_keys_wrap() {
        let mut app = app();
        handle_key(&mut app, KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(app.current(), ScreenId::Build);
        handle_key(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.current(), ScreenId::Menu);
        handle_key(&mut app, KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(app.current(), ScreenId::Pages);
    }

    #[test]
    fn open_action_switches_to_pages() {
        let mut app = app();
        app.apply(Action::Open("/partners/rxo".to_string()));
        assert_eq!(app.current(), ScreenId::Pages);
        assert_eq!(app.status, "Previewing /partners/rxo");

        app.apply(Action::Open("/contact".to_string()));
        assert_eq!(app.status, "/contact is not a generated page");
    }

    #[test]
    fn help_swallows_the_next_key() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(app.show_help);
        handle_key(&mut app, KeyCode::Char('m'), KeyModifiers::NONE);
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }
}
