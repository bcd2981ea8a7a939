//! Slug-keyed entity registries for dispatchpages.
//!
//! - [`Registry`]: an immutable, ordered, slug-indexed collection
//! - [`LazyRegistry`]: build-once initialization backed by `OnceLock`
//! - [`LaneRegistry`]: lanes keyed by `(state, lane)`
//! - [`Catalog`]: the four category registries behind one handle
//!
//! Entity data is compiled in from `data/`; states can be replaced by a
//! directory of JSON documents at runtime.

pub mod catalog;
pub mod data;
pub mod lanes;
pub mod lazy;
pub mod registry;

pub use catalog::{Catalog, CatalogStats, builtin_catalog};
pub use data::{builtin_partners, builtin_states, builtin_truck_types, load_states_dir};
pub use lanes::LaneRegistry;
pub use lazy::{Factory, LazyRegistry};
pub use registry::Registry;
