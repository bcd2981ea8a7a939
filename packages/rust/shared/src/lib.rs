//! Shared types, error model, and configuration for dispatchpages.
//!
//! This crate is the foundation depended on by all other dispatchpages crates.
//! It provides:
//! - [`DispatchPagesError`]: the unified error type
//! - Entity records ([`StateEntity`], [`LaneEntity`], [`TruckTypeEntity`], [`PartnerEntity`])
//! - Build output types ([`SiteManifest`], [`PageRecord`], [`BuildId`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod entity;
pub mod error;
pub mod paths;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildSettings, CatalogConfig, ContentConfig, SiteConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, validate_site_url,
};
pub use entity::{
    ChallengeSolution, ComparisonRow, Entity, EquipmentItem, LaneEntity, LaneSummary, MarketRate,
    PartnerEntity, Pricing, ProcessStep, RegionalHotspot, Specification, StateEntity,
    SuccessStory, TitledItem, TruckLane, TruckTypeEntity, comparison_columns, lane_key,
};
pub use error::{DispatchPagesError, Result};
pub use types::{BuildId, CURRENT_SCHEMA_VERSION, OutputFormat, PageKind, PageRecord, SiteManifest};
