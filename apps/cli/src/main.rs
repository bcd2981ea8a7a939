//! dispatchpages CLI: build the truck-dispatch marketing site from the
//! entity catalog, and inspect routes, pages and navigation.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
