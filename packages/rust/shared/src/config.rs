//! Application configuration for dispatchpages.
//!
//! User config lives at `~/.dispatchpages/dispatchpages.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DispatchPagesError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "dispatchpages.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".dispatchpages";

// ---------------------------------------------------------------------------
// Config structs (matching dispatchpages.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Public site identity.
    #[serde(default)]
    pub site: SiteConfig,

    /// Static build output.
    #[serde(default)]
    pub build: BuildSettings,

    /// Entity catalog sources.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Content-structure audit.
    #[serde(default)]
    pub content: ContentConfig,
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Canonical base URL, used for the sitemap and schema provider.
    #[serde(default = "default_site_url")]
    pub url: String,

    /// Organization name used as the schema provider.
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// Phone number shown in contact blocks.
    #[serde(default = "default_phone")]
    pub phone: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_site_url(),
            company_name: default_company_name(),
            phone: default_phone(),
        }
    }
}

fn default_site_url() -> String {
    "https://www.growtrucking.com".into()
}
fn default_company_name() -> String {
    "Grow Trucking".into()
}
fn default_phone() -> String {
    "(313) 307-3834".into()
}

/// `[build]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Page format: "html" or "markdown".
    #[serde(default = "default_format")]
    pub format: String,

    /// Whether to write `sitemap.xml`.
    #[serde(default = "default_true")]
    pub sitemap: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: default_format(),
            sitemap: true,
        }
    }
}

fn default_output_dir() -> String {
    "dist".into()
}
fn default_format() -> String {
    "html".into()
}
fn default_true() -> bool {
    true
}

/// `[catalog]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory of state JSON documents replacing the compiled-in states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states_dir: Option<String>,
}

/// `[content]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Fail `validate` when the content audit reports issues.
    #[serde(default)]
    pub strict: bool,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.dispatchpages/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DispatchPagesError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.dispatchpages/dispatchpages.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DispatchPagesError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DispatchPagesError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DispatchPagesError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DispatchPagesError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DispatchPagesError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Parse `site.url` and require an absolute http(s) URL.
pub fn validate_site_url(config: &AppConfig) -> Result<Url> {
    let raw = config.site.url.trim();
    let url = Url::parse(raw)
        .map_err(|e| DispatchPagesError::config(format!("invalid site.url '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DispatchPagesError::config(format!(
            "site.url must use http or https, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("output_dir"));
        assert!(toml_str.contains("growtrucking.com"));
        assert!(!toml_str.contains("states_dir"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let toml_str = r#"
[site]
phone = "(555) 010-0000"

[build]
format = "markdown"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.site.phone, "(555) 010-0000");
        assert_eq!(config.site.company_name, "Grow Trucking");
        assert_eq!(config.build.format, "markdown");
        assert_eq!(config.build.output_dir, "dist");
        assert!(config.build.sitemap);
        assert!(!config.content.strict);
    }

    #[test]
    fn catalog_override_parses() {
        let toml_str = r#"
[catalog]
states_dir = "/srv/data/states"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.catalog.states_dir.as_deref(), Some("/srv/data/states"));
    }

    #[test]
    fn site_url_validation() {
        let mut config = AppConfig::default();
        let url = validate_site_url(&config).expect("default url is valid");
        assert_eq!(url.host_str(), Some("www.growtrucking.com"));

        config.site.url = "ftp://example.com".into();
        let err = validate_site_url(&config).unwrap_err();
        assert!(err.to_string().contains("http or https"));

        config.site.url = "not a url".into();
        assert!(validate_site_url(&config).is_err());
    }
}
