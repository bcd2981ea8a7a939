//! Page composition, rendering and site assembly for dispatchpages.
//!
//! This crate turns catalog entities into pages and pages into a static site
//! (`build_site`), and holds the navigation tree, the menu state machine,
//! the content audit and the signup boundary.

pub mod assembler;
pub mod content;
pub mod menu;
pub mod navigation;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod routes;
pub mod schema;
pub mod signup;

pub use assembler::{AssembleConfig, AssembleResult, RenderedPage, assemble_site, validate_site};
pub use content::{ContentIssue, audit, audit_all};
pub use menu::MenuState;
pub use navigation::{NavItem, navigation};
pub use page::{ComposedPage, PageEntity, compose_entity, compose_index, compose_page};
pub use pipeline::{
    BuildConfig, BuildResult, ProgressReporter, SilentProgress, audit_site, build_site, compose_all,
};
pub use render::{HtmlRenderer, MarkdownRenderer, Renderer, renderer_for};
pub use routes::{IndexPage, PageRef, Resolution, resolve, resolve_page, site_routes};
pub use schema::{JsonLdServiceSchema, SchemaGenerator, ServiceProjection};
pub use signup::{
    FieldErrors, SignupError, SignupForm, SignupKind, SignupOutcome, SignupRequest,
    SignupResponse, SignupService, submit_signup, validate_signup,
};
