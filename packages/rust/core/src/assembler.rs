//! Static site assembler.
//!
//! Takes rendered pages and writes the output directory: one
//! `index.{html|md}` per page path, `manifest.json` with checksums, and
//! optionally `sitemap.xml`.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use dispatchpages_shared::{
    BuildId, CURRENT_SCHEMA_VERSION, DispatchPagesError, OutputFormat, PageKind, PageRecord,
    Result, SiteManifest,
};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Output from a successful site assembly.
#[derive(Debug, Clone)]
pub struct AssembleResult {
    /// Root of the assembled site.
    pub site_path: PathBuf,
    /// Number of pages written.
    pub page_count: usize,
    /// Files from an earlier build that are no longer produced and were removed.
    pub removed: usize,
    /// The manifest that was written.
    pub manifest: SiteManifest,
}

/// A page ready for assembly.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Canonical URL path (e.g., `/states/texas-truck-dispatch-service`).
    pub path: String,
    pub kind: PageKind,
    /// Rendered document text.
    pub content: String,
}

/// Configuration for site assembly.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Output directory (e.g., `dist/`).
    pub output_dir: PathBuf,
    /// Base URL for sitemap entries.
    pub site_url: String,
    pub format: OutputFormat,
    /// Whether to write `sitemap.xml`.
    pub sitemap: bool,
    /// Tool version string.
    pub tool_version: String,
}

/// Assemble the site directory.
///
/// ```text
/// <output_dir>/
/// ├── manifest.json
/// ├── sitemap.xml
/// ├── states/
/// │   ├── index.html
/// │   └── texas-truck-dispatch-service/
/// │       ├── index.html
/// │       └── lanes/...
/// └── truck-type/...
/// ```
///
/// Re-running over the same directory keeps the build id and creation time of
/// the existing manifest.
#[instrument(skip_all, fields(out = %config.output_dir.display(), pages = pages.len()))]
pub fn assemble_site(config: &AssembleConfig, pages: &[RenderedPage]) -> Result<AssembleResult> {
    let out = &config.output_dir;
    info!(path = %out.display(), format = ?config.format, "assembling site");

    std::fs::create_dir_all(out).map_err(|e| DispatchPagesError::io(out, e))?;

    let previous = read_manifest(out).ok();

    let mut records = Vec::with_capacity(pages.len());
    let mut seen = BTreeSet::new();
    for page in pages {
        let file = page_file(&page.path, config.format)?;
        if !seen.insert(file.clone()) {
            return Err(DispatchPagesError::validation(format!(
                "two pages render to the same file: {file}"
            )));
        }
        write_atomic(&out.join(&file), page.content.as_bytes())?;
        debug!(path = %page.path, file = %file, "wrote page");

        records.push(PageRecord {
            path: page.path.clone(),
            file,
            kind: page.kind,
            sha256: sha256_hex(page.content.as_bytes()),
            size_bytes: page.content.len(),
        });
    }

    let removed = previous
        .as_ref()
        .map(|old| prune_stale(out, old, &seen))
        .unwrap_or(0);

    let manifest = build_manifest(config, previous.as_ref(), records);
    write_json(&out.join(MANIFEST_FILE), &manifest)?;

    let sitemap_path = out.join(SITEMAP_FILE);
    if config.sitemap {
        write_atomic(&sitemap_path, build_sitemap(&config.site_url, pages).as_bytes())?;
    } else if sitemap_path.exists() {
        std::fs::remove_file(&sitemap_path).map_err(|e| DispatchPagesError::io(&sitemap_path, e))?;
    }

    info!(
        page_count = pages.len(),
        removed,
        path = %out.display(),
        "site assembly complete"
    );

    Ok(AssembleResult {
        site_path: out.clone(),
        page_count: pages.len(),
        removed,
        manifest,
    })
}

/// Verify that a built site is well-formed: manifest present and current,
/// every listed page on disk with a matching checksum.
pub fn validate_site(out: &Path) -> Result<SiteManifest> {
    let manifest_path = out.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        return Err(DispatchPagesError::validation("missing manifest.json"));
    }

    let manifest = read_manifest(out)?;

    if manifest.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(DispatchPagesError::validation(format!(
            "unsupported schema_version: {} (expected {})",
            manifest.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    if manifest.page_count != manifest.pages.len() {
        return Err(DispatchPagesError::validation(format!(
            "manifest lists {} pages but page_count is {}",
            manifest.pages.len(),
            manifest.page_count
        )));
    }

    for record in &manifest.pages {
        if !is_contained(&record.file) {
            return Err(DispatchPagesError::validation(format!(
                "page file escapes the site directory: {}",
                record.file
            )));
        }
        let file_path = out.join(&record.file);
        let bytes = std::fs::read(&file_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DispatchPagesError::validation(format!("missing page file: {}", record.file))
            } else {
                DispatchPagesError::io(&file_path, e)
            }
        })?;
        if bytes.len() != record.size_bytes || sha256_hex(&bytes) != record.sha256 {
            return Err(DispatchPagesError::validation(format!(
                "checksum mismatch for {}",
                record.file
            )));
        }
    }

    debug!(pages = manifest.pages.len(), "site validated");
    Ok(manifest)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Relative file for a URL path: `/a/b` becomes `a/b/index.html`.
///
/// A path with a `..` segment is rejected: every page lands inside the
/// output directory.
pub fn page_file(path: &str, format: OutputFormat) -> Result<String> {
    let trimmed = path.trim_matches('/');
    let name = format!("index.{}", format.extension());
    let file = if trimmed.is_empty() {
        name
    } else {
        format!("{trimmed}/{name}")
    };
    if !is_contained(&file) {
        return Err(DispatchPagesError::validation(format!(
            "page path does not map inside the site directory: {path}"
        )));
    }
    Ok(file)
}

/// Whether `file` is a relative path made only of normal components.
fn is_contained(file: &str) -> bool {
    let path = Path::new(file);
    !file.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn read_manifest(out: &Path) -> Result<SiteManifest> {
    let manifest_path = out.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&manifest_path)
        .map_err(|e| DispatchPagesError::io(&manifest_path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| DispatchPagesError::validation(format!("invalid manifest.json: {e}")))
}

fn build_manifest(
    config: &AssembleConfig,
    previous: Option<&SiteManifest>,
    pages: Vec<PageRecord>,
) -> SiteManifest {
    let now = Utc::now();
    let (id, created_at) = match previous {
        Some(old) => (old.id.clone(), old.created_at),
        None => (BuildId::new(), now),
    };
    SiteManifest {
        schema_version: CURRENT_SCHEMA_VERSION,
        id,
        site_url: config.site_url.clone(),
        tool_version: config.tool_version.clone(),
        format: config.format,
        created_at,
        updated_at: now,
        page_count: pages.len(),
        pages,
    }
}

/// Remove files listed by the previous manifest that this build did not write.
fn prune_stale(out: &Path, previous: &SiteManifest, written: &BTreeSet<String>) -> usize {
    let mut removed = 0;
    for record in previous.pages.iter().filter(|r| !written.contains(&r.file)) {
        if !is_contained(&record.file) {
            warn!(file = %record.file, "refusing to remove a file outside the site directory");
            continue;
        }
        let file_path = out.join(&record.file);
        match std::fs::remove_file(&file_path) {
            Ok(()) => {
                removed += 1;
                debug!(file = %record.file, "removed stale page");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(file = %record.file, error = %e, "could not remove stale page"),
        }
    }
    removed
}

fn build_sitemap(site_url: &str, pages: &[RenderedPage]) -> String {
    let base = site_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for page in pages {
        xml.push_str("  <url><loc>");
        xml.push_str(&escape_xml(&format!("{base}{}", page.path)));
        xml.push_str("</loc></url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Write to a temp file next to `target`, then rename over it.
fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| DispatchPagesError::io(parent, e))?;

    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = parent.join(format!(".{file_name}.tmp"));

    std::fs::write(&temp, bytes).map_err(|e| DispatchPagesError::io(&temp, e))?;
    std::fs::rename(&temp, target).map_err(|e| DispatchPagesError::io(target, e))?;
    Ok(())
}

/// Write a JSON file (pretty-printed).
fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| DispatchPagesError::validation(format!("JSON serialization failed: {e}")))?;
    write_atomic(path, json.as_bytes())?;
    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
