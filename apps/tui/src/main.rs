//! dispatchpages TUI: browse the navigation menu and preview composed pages.
//!
//! Built with `ratatui` + `crossterm`. Logs go to
//! `~/.dispatchpages/dispatchpages-tui.log` so they never touch the screen.

mod app;
mod screens;
mod widgets;

use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::Result;
use dispatchpages_shared::config_dir;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE: &str = "dispatchpages-tui.log";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_file_logging()?;
    app::run()
}

fn init_file_logging() -> Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dispatchpages=info"));
    fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
