//! Error types for dispatchpages.
//!
//! Library crates use [`DispatchPagesError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all dispatchpages operations.
#[derive(Debug, thiserror::Error)]
pub enum DispatchPagesError {
    /// Settings file loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// An entity catalog could not be built (duplicate slug, malformed data).
    ///
    /// Raised while a registry is constructed and treated as fatal at startup.
    #[error("{category} catalog is misconfigured: {message}")]
    Configuration {
        category: &'static str,
        message: String,
    },

    /// A slug or path did not resolve to an entity.
    #[error("no {category} found for '{slug}'")]
    NotFound {
        category: &'static str,
        slug: String,
    },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (malformed output, failed audit, serialization).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DispatchPagesError>;

impl DispatchPagesError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a catalog configuration error for a category.
    pub fn configuration(category: &'static str, msg: impl Into<String>) -> Self {
        Self::Configuration {
            category,
            message: msg.into(),
        }
    }

    /// A second entity claimed a slug that is already registered.
    pub fn duplicate_slug(category: &'static str, slug: &str) -> Self {
        Self::configuration(category, format!("duplicate slug '{slug}'"))
    }

    /// Create a not-found error for a category lookup.
    pub fn not_found(category: &'static str, slug: impl Into<String>) -> Self {
        Self::NotFound {
            category,
            slug: slug.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is the "page does not exist" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DispatchPagesError::config("site.url is empty");
        assert_eq!(err.to_string(), "config error: site.url is empty");

        let err = DispatchPagesError::duplicate_slug("truck-type", "reefer");
        assert_eq!(
            err.to_string(),
            "truck-type catalog is misconfigured: duplicate slug 'reefer'"
        );

        let err = DispatchPagesError::not_found("state", "atlantis");
        assert!(err.to_string().contains("'atlantis'"));
        assert!(err.is_not_found());
    }
}
