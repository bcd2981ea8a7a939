//! End-to-end `build` pipeline: catalog → routes → compose → render → assemble.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use dispatchpages_registry::{Catalog, CatalogStats};
use dispatchpages_shared::{AppConfig, BuildId, DispatchPagesError, OutputFormat, Result, SiteConfig};

use crate::assembler::{AssembleConfig, RenderedPage, assemble_site};
use crate::content::{ContentIssue, audit_all};
use crate::page::{ComposedPage, compose_page};
use crate::render::renderer_for;
use crate::routes::site_routes;
use crate::schema::{JsonLdServiceSchema, SchemaGenerator};

/// Configuration for the `build` pipeline.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub site: SiteConfig,
    /// Output directory for the generated site.
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub sitemap: bool,
    /// Tool version string recorded in the manifest.
    pub tool_version: String,
}

impl BuildConfig {
    /// Derive a build configuration from the loaded app config.
    pub fn from_app(config: &AppConfig, tool_version: impl Into<String>) -> Result<Self> {
        let format = config
            .build
            .format
            .parse::<OutputFormat>()
            .map_err(DispatchPagesError::config)?;
        Ok(Self {
            site: config.site.clone(),
            output_dir: PathBuf::from(&config.build.output_dir),
            format,
            sitemap: config.build.sitemap,
            tool_version: tool_version.into(),
        })
    }
}

/// Result of the `build` pipeline.
#[derive(Debug)]
pub struct BuildResult {
    /// Root of the generated site.
    pub site_path: PathBuf,
    pub build_id: BuildId,
    pub stats: CatalogStats,
    /// Number of pages written.
    pub page_count: usize,
    /// Stale files removed from an earlier build.
    pub removed: usize,
    /// Sections skipped across all pages.
    pub skipped_sections: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each page is composed.
    fn page_composed(&self, path: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_composed(&self, _path: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

/// Compose every page the site serves, in route order.
pub fn compose_all(
    catalog: &Catalog,
    site: &SiteConfig,
    schema: &dyn SchemaGenerator,
    progress: &dyn ProgressReporter,
) -> Result<Vec<ComposedPage>> {
    let routes = site_routes(catalog)?;
    let total = routes.len();
    let mut pages = Vec::with_capacity(total);
    for (i, route) in routes.iter().enumerate() {
        let page = compose_page(catalog, route, site, schema)?;
        progress.page_composed(&page.path, i + 1, total);
        pages.push(page);
    }
    Ok(pages)
}

/// Run the full `build` pipeline.
///
/// 1. Initialise the catalog (fails fast on bad data)
/// 2. Enumerate routes
/// 3. Compose each page
/// 4. Render to the configured format
/// 5. Assemble the output directory
#[instrument(skip_all, fields(out = %config.output_dir.display(), format = ?config.format))]
pub fn build_site(
    config: &BuildConfig,
    catalog: &Catalog,
    progress: &dyn ProgressReporter,
) -> Result<BuildResult> {
    let start = Instant::now();

    // --- Phase 1: Catalog ---
    progress.phase("Loading catalog");
    let stats = catalog.initialize()?;
    info!(
        states = stats.states,
        lanes = stats.lanes,
        truck_types = stats.truck_types,
        partners = stats.partners,
        "catalog ready"
    );

    // --- Phase 2 + 3: Routes and composition ---
    progress.phase("Composing pages");
    let schema = JsonLdServiceSchema::from_site(&config.site);
    let pages = compose_all(catalog, &config.site, &schema, progress)?;
    let skipped_sections = pages.iter().map(|p| p.skipped.len()).sum();

    // --- Phase 4: Render ---
    progress.phase("Rendering");
    let renderer = renderer_for(config.format);
    let rendered: Vec<RenderedPage> = pages
        .iter()
        .map(|page| RenderedPage {
            path: page.path.clone(),
            kind: page.kind,
            content: renderer.render(page, &config.site),
        })
        .collect();

    // --- Phase 5: Assemble ---
    progress.phase("Writing site");
    let assembled = assemble_site(
        &AssembleConfig {
            output_dir: config.output_dir.clone(),
            site_url: config.site.url.clone(),
            format: config.format,
            sitemap: config.sitemap,
            tool_version: config.tool_version.clone(),
        },
        &rendered,
    )?;

    let result = BuildResult {
        site_path: assembled.site_path,
        build_id: assembled.manifest.id.clone(),
        stats,
        page_count: assembled.page_count,
        removed: assembled.removed,
        skipped_sections,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        build_id = %result.build_id,
        page_count = result.page_count,
        skipped_sections = result.skipped_sections,
        elapsed_ms = result.elapsed.as_millis(),
        "build pipeline complete"
    );

    Ok(result)
}

/// Compose everything and run the content audit.
#[instrument(skip_all, fields(strict = strict))]
pub fn audit_site(catalog: &Catalog, site: &SiteConfig, strict: bool) -> Result<Vec<ContentIssue>> {
    catalog.initialize()?;
    let schema = JsonLdServiceSchema::from_site(site);
    let pages = compose_all(catalog, site, &schema, &SilentProgress)?;
    audit_all(&pages, strict)
}
