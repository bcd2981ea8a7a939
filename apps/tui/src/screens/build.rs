//! "Build" screen: write the site and verify the output directory.

use crossterm::event::{KeyCode, KeyModifiers};
use dispatchpages_core::assembler::validate_site;
use dispatchpages_core::pipeline::{BuildConfig, SilentProgress, audit_site, build_site};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::{info, warn};

use super::{Action, Context};

pub(crate) struct BuildScreen {
    config: Option<BuildConfig>,
    /// Report lines from the last action.
    report: Vec<String>,
}

impl BuildScreen {
    pub(crate) fn new(ctx: &Context) -> Self {
        let (config, report) = match BuildConfig::from_app(&ctx.config, env!("CARGO_PKG_VERSION")) {
            Ok(config) => (Some(config), vec!["Press 'b' to build, 'v' to verify, 'a' to audit content.".to_string()]),
            Err(e) => (None, vec![format!("Invalid build settings: {e}")]),
        };
        Self { config, report }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(5), // Settings
                Constraint::Min(1),    // Report
            ])
            .split(area);

        let settings = match &self.config {
            Some(config) => vec![
                Line::from(format!("  Output:   {}", config.output_dir.display())),
                Line::from(format!("  Format:   {}", config.format.extension())),
                Line::from(format!("  Sitemap:  {}", if config.sitemap { "yes" } else { "no" })),
            ],
            None => vec![Line::from("  (unavailable)")],
        };
        f.render_widget(
            Paragraph::new(settings).block(Block::default().borders(Borders::ALL).title(" Settings ")),
            chunks[0],
        );

        let report: Vec<Line> = self.report.iter().map(|l| Line::from(l.as_str())).collect();
        f.render_widget(
            Paragraph::new(report)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(" Report ")),
            chunks[1],
        );
    }

    pub(crate) fn handle_key(&mut self, ctx: &Context, code: KeyCode, _modifiers: KeyModifiers) -> Action {
        let Some(config) = self.config.clone() else {
            return Action::None;
        };
        match code {
            KeyCode::Char('b') => self.build(ctx, &config),
            KeyCode::Char('v') => self.verify(&config),
            KeyCode::Char('a') => self.audit(ctx),
            _ => Action::None,
        }
    }

    fn build(&mut self, ctx: &Context, config: &BuildConfig) -> Action {
        match build_site(config, &ctx.catalog, &SilentProgress) {
            Ok(result) => {
                info!(build_id = %result.build_id, "site built from TUI");
                self.report = vec![
                    format!("Build:    {}", result.build_id),
                    format!("Pages:    {}", result.page_count),
                    format!("Skipped:  {} empty sections", result.skipped_sections),
                    format!("Removed:  {} stale files", result.removed),
                    format!("Time:     {:.2}s", result.elapsed.as_secs_f64()),
                ];
                Action::Status(format!("Built {} pages", result.page_count))
            }
            Err(e) => self.failed("Build failed", e),
        }
    }

    fn verify(&mut self, config: &BuildConfig) -> Action {
        match validate_site(&config.output_dir) {
            Ok(manifest) => {
                self.report = vec![
                    format!("Manifest OK (build {})", manifest.id),
                    format!("{} pages, checksums match", manifest.page_count),
                    format!("Updated {}", manifest.updated_at.to_rfc3339()),
                ];
                Action::Status("Site verified".to_string())
            }
            Err(e) => self.failed("Verification failed", e),
        }
    }

    fn audit(&mut self, ctx: &Context) -> Action {
        match audit_site(&ctx.catalog, &ctx.config.site, false) {
            Ok(issues) if issues.is_empty() => {
                self.report = vec!["Content audit: no issues".to_string()];
                Action::Status("Audit clean".to_string())
            }
            Ok(issues) => {
                self.report = std::iter::once(format!("Content audit: {} issue(s)", issues.len()))
                    .chain(issues.iter().map(|issue| format!("  {issue}")))
                    .collect();
                Action::Status(format!("{} content issue(s)", issues.len()))
            }
            Err(e) => self.failed("Audit failed", e),
        }
    }

    fn failed(&mut self, what: &str, e: impl std::fmt::Display) -> Action {
        warn!(error = %e, "{what}");
        self.report = vec![format!("{what}: {e}")];
        Action::Status(what.to_string())
    }
}
