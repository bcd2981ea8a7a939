//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use dispatchpages_core::navigation::{NavItem, navigation};
use dispatchpages_core::pipeline::{BuildConfig, BuildResult, ProgressReporter, audit_site, build_site};
use dispatchpages_core::routes::{Resolution, resolve, routes_of_kind, site_routes};
use dispatchpages_core::{JsonLdServiceSchema, compose_page, renderer_for, validate_site};
use dispatchpages_registry::Catalog;
use dispatchpages_shared::{
    AppConfig, Entity, OutputFormat, PageKind, init_config, load_config, validate_site_url,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// dispatchpages: build truck-dispatch landing pages from a typed catalog.
#[derive(Parser)]
#[command(
    name = "dispatchpages",
    version,
    about = "Build and inspect truck-dispatch landing pages from the entity catalog.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Override the site base URL.
    #[arg(long, env = "DISPATCHPAGES_SITE_URL", global = true)]
    pub site_url: Option<String>,

    /// Override the contact phone number.
    #[arg(long, env = "DISPATCHPAGES_PHONE", global = true)]
    pub phone: Option<String>,

    /// Load state documents from this directory instead of the built-in set.
    #[arg(long, global = true)]
    pub states_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Page format accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum FormatArg {
    Html,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

/// Entity category.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum Category {
    States,
    Lanes,
    TruckTypes,
    Partners,
    Index,
}

impl From<Category> for PageKind {
    fn from(value: Category) -> Self {
        match value {
            Category::States => PageKind::State,
            Category::Lanes => PageKind::Lane,
            Category::TruckTypes => PageKind::TruckType,
            Category::Partners => PageKind::Partner,
            Category::Index => PageKind::Index,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Compose, render and write every page.
    Build {
        /// Output directory (defaults to build.output_dir).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Page format (defaults to build.format).
        #[arg(short, long)]
        format: Option<FormatArg>,

        /// Skip writing sitemap.xml.
        #[arg(long)]
        no_sitemap: bool,
    },

    /// Print every canonical route.
    Routes {
        /// Only routes of this category.
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// List the entities of one category.
    List {
        category: Category,
    },

    /// Resolve a path and print the composed page.
    Show {
        /// Request path, e.g. /states/texas-truck-dispatch-service.
        path: String,

        /// Output format.
        #[arg(short, long, default_value = "markdown")]
        format: FormatArg,
    },

    /// Check catalog content and, if present, the built site.
    Validate {
        /// Treat content-audit findings as errors.
        #[arg(long)]
        strict: bool,

        /// Built site to verify (defaults to build.output_dir).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the navigation tree.
    Menu,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "dispatchpages=info",
        1 => "dispatchpages=debug",
        _ => "dispatchpages=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Config and catalog after applying global overrides.
struct Context {
    config: AppConfig,
    catalog: Catalog,
}

impl Context {
    fn load(cli: &Cli) -> Result<Self> {
        let mut config = load_config()?;
        if let Some(url) = &cli.site_url {
            config.site.url = url.clone();
        }
        if let Some(phone) = &cli.phone {
            config.site.phone = phone.clone();
        }
        if let Some(dir) = &cli.states_dir {
            config.catalog.states_dir = Some(dir.to_string_lossy().into_owned());
        }
        validate_site_url(&config)?;

        let catalog = match &config.catalog.states_dir {
            Some(dir) => Catalog::with_states_dir(dir),
            None => Catalog::builtin(),
        };
        Ok(Self { config, catalog })
    }
}

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&cli),
        };
    }

    let ctx = Context::load(&cli)?;
    match cli.command {
        Command::Build {
            out,
            format,
            no_sitemap,
        } => cmd_build(&ctx, out, format, no_sitemap),
        Command::Routes { category } => cmd_routes(&ctx, category),
        Command::List { category } => cmd_list(&ctx, category),
        Command::Show { path, format } => cmd_show(&ctx, &path, format),
        Command::Validate { strict, out } => cmd_validate(&ctx, strict, out),
        Command::Menu => cmd_menu(&ctx),
        Command::Config { .. } => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

fn cmd_build(ctx: &Context, out: Option<PathBuf>, format: Option<FormatArg>, no_sitemap: bool) -> Result<()> {
    let mut config = BuildConfig::from_app(&ctx.config, env!("CARGO_PKG_VERSION"))?;
    if let Some(out) = out {
        config.output_dir = out;
    }
    if let Some(format) = format {
        config.format = format.into();
    }
    if no_sitemap {
        config.sitemap = false;
    }

    info!(
        out = %config.output_dir.display(),
        format = config.format.extension(),
        "building site"
    );

    let reporter = CliProgress::new()?;
    let result = build_site(&config, &ctx.catalog, &reporter)?;

    println!();
    println!("  Site built successfully!");
    println!("  Build:    {}", result.build_id);
    println!(
        "  Catalog:  {} states, {} lanes, {} truck types, {} partners",
        result.stats.states, result.stats.lanes, result.stats.truck_types, result.stats.partners
    );
    println!("  Pages:    {}", result.page_count);
    println!("  Skipped:  {} empty sections", result.skipped_sections);
    if result.removed > 0 {
        println!("  Removed:  {} stale files", result.removed);
    }
    println!("  Path:     {}", result.site_path.display());
    println!("  Time:     {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Result<Self> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")?
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Ok(Self { spinner })
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn page_composed(&self, path: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Composing [{current}/{total}] {path}"));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Inspection commands
// ---------------------------------------------------------------------------

fn cmd_routes(ctx: &Context, category: Option<Category>) -> Result<()> {
    let routes = match category {
        Some(category) => routes_of_kind(&ctx.catalog, category.into())?,
        None => site_routes(&ctx.catalog)?,
    };
    for route in &routes {
        println!("{:<10} {}", route.kind().to_string(), route.path());
    }
    info!(count = routes.len(), "listed routes");
    Ok(())
}

fn cmd_list(ctx: &Context, category: Category) -> Result<()> {
    let rows: Vec<(String, String)> = match category {
        Category::States => entity_rows(ctx.catalog.states()?.get_all()),
        Category::Lanes => ctx
            .catalog
            .lanes()?
            .get_all()
            .iter()
            .map(|lane| (format!("{}/{}", lane.state_slug, lane.slug), lane.display_name.clone()))
            .collect(),
        Category::TruckTypes => entity_rows(ctx.catalog.truck_types()?.get_all()),
        Category::Partners => entity_rows(ctx.catalog.partners()?.get_all()),
        Category::Index => {
            return Err(eyre!("index pages are not catalog entities; try `routes --category index`"));
        }
    };

    if rows.is_empty() {
        println!("No entries.");
        return Ok(());
    }

    let width = rows.iter().map(|(slug, _)| slug.len()).max().unwrap_or(0);
    for (slug, name) in &rows {
        println!("{slug:<width$}  {name}");
    }
    Ok(())
}

fn entity_rows<E: Entity>(entities: &[E]) -> Vec<(String, String)> {
    entities
        .iter()
        .map(|e| (e.slug().to_owned(), e.display_name().to_owned()))
        .collect()
}

fn cmd_show(ctx: &Context, path: &str, format: FormatArg) -> Result<()> {
    let page = match resolve(&ctx.catalog, path)? {
        Resolution::Page(page) => page,
        Resolution::Redirect(target) => {
            println!("{path} redirects to {target}");
            return Ok(());
        }
        Resolution::NotFound => return Err(eyre!("no page at '{path}'")),
    };

    let site = &ctx.config.site;
    let schema = JsonLdServiceSchema::from_site(site);
    let composed = compose_page(&ctx.catalog, &page, site, &schema)?;
    if !composed.skipped.is_empty() {
        info!(skipped = ?composed.skipped, "sections with nothing to show");
    }

    let renderer = renderer_for(format.into());
    print!("{}", renderer.render(&composed, site));
    Ok(())
}

fn cmd_validate(ctx: &Context, strict: bool, out: Option<PathBuf>) -> Result<()> {
    let strict = strict || ctx.config.content.strict;
    let stats = ctx.catalog.initialize()?;
    println!(
        "Catalog OK: {} states, {} lanes, {} truck types, {} partners",
        stats.states, stats.lanes, stats.truck_types, stats.partners
    );

    let issues = audit_site(&ctx.catalog, &ctx.config.site, strict)?;
    if issues.is_empty() {
        println!("Content audit: no issues");
    } else {
        println!("Content audit: {} issue(s)", issues.len());
        for issue in &issues {
            println!("  {issue}");
        }
    }

    let out = out.unwrap_or_else(|| PathBuf::from(&ctx.config.build.output_dir));
    if out.exists() {
        let manifest = validate_site(&out)?;
        println!(
            "Site OK: {} pages in {} (build {})",
            manifest.page_count,
            out.display(),
            manifest.id
        );
    } else {
        warn!(out = %out.display(), "no built site to verify");
    }
    Ok(())
}

fn cmd_menu(ctx: &Context) -> Result<()> {
    let tree = navigation(&ctx.catalog)?;
    for item in &tree {
        print_nav(item, 0);
    }
    Ok(())
}

fn print_nav(item: &NavItem, depth: usize) {
    println!("{:indent$}{}  {}", "", item.label, item.href, indent = depth * 2);
    for child in &item.children {
        print_nav(child, depth + 1);
    }
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let toml_str = toml::to_string_pretty(&ctx.config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_flags() {
        let cli = Cli::try_parse_from([
            "dispatchpages",
            "--site-url",
            "https://example.com",
            "build",
            "--out",
            "public",
            "--format",
            "markdown",
            "--no-sitemap",
        ])
        .unwrap();

        assert_eq!(cli.site_url.as_deref(), Some("https://example.com"));
        match cli.command {
            Command::Build {
                out,
                format,
                no_sitemap,
            } => {
                assert_eq!(out, Some(PathBuf::from("public")));
                assert!(matches!(format, Some(FormatArg::Markdown)));
                assert!(no_sitemap);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn parses_categories() {
        let cli = Cli::try_parse_from(["dispatchpages", "list", "truck-types"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List {
                category: Category::TruckTypes
            }
        ));
        assert_eq!(PageKind::from(Category::Lanes), PageKind::Lane);
    }

    #[test]
    fn show_defaults_to_markdown() {
        let cli = Cli::try_parse_from(["dispatchpages", "-v", "show", "/truck-type/reefer"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Show { path, format } => {
                assert_eq!(path, "/truck-type/reefer");
                assert_eq!(OutputFormat::from(format), OutputFormat::Markdown);
            }
            _ => panic!("expected show"),
        }
    }
}
