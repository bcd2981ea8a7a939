//! Build output types shared by the pipeline, CLI, and TUI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version for the site manifest format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// BuildId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for build identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(pub Uuid);

impl BuildId {
    /// Generate a new time-sortable build identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BuildId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BuildId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Page kinds and output formats
// ---------------------------------------------------------------------------

/// The kind of page a route produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    State,
    Lane,
    TruckType,
    Partner,
    Index,
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::State => "state",
            Self::Lane => "lane",
            Self::TruckType => "truck-type",
            Self::Partner => "partner",
            Self::Index => "index",
        };
        f.write_str(name)
    }
}

/// Output format for rendered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    Markdown,
}

impl OutputFormat {
    /// File extension for pages in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown output format '{other}' (expected html or markdown)")),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteManifest
// ---------------------------------------------------------------------------

/// The `manifest.json` structure stored at the root of a built site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteManifest {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Unique identifier for this build.
    pub id: BuildId,
    /// Canonical site URL the build was generated for.
    pub site_url: String,
    /// Tool version that produced the build.
    pub tool_version: String,
    /// Page format.
    pub format: OutputFormat,
    /// When the output directory was first built.
    pub created_at: DateTime<Utc>,
    /// When the output directory was last rebuilt.
    pub updated_at: DateTime<Utc>,
    /// Total number of pages written.
    pub page_count: usize,
    /// One record per written page, in route order.
    pub pages: Vec<PageRecord>,
}

/// A single written page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Route path (e.g., `/states/texas-truck-dispatch-service`).
    pub path: String,
    /// File path relative to the output root.
    pub file: String,
    pub kind: PageKind,
    pub sha256: String,
    pub size_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_ids_are_time_sortable() {
        let a = BuildId::new();
        let b = BuildId::new();
        assert!(a.0 <= b.0);
        let parsed: BuildId = a.to_string().parse().expect("parse build id");
        assert_eq!(parsed, a);
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("pdf".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Markdown.extension(), "md");
    }

    #[test]
    fn page_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&PageKind::TruckType).expect("serialize");
        assert_eq!(json, "\"truck-type\"");
        assert_eq!(PageKind::TruckType.to_string(), "truck-type");
    }
}
