//! Page sections for dispatchpages.
//!
//! Every page is an ordered list of pure sections, each a function of one
//! entity that renders a [`Block`] or nothing. [`compose`] folds the list
//! into a [`Composition`]; the per-category lists live in [`state`], [`lane`],
//! [`truck_type`] and [`partner`].

pub mod block;
pub mod compose;
pub mod fallback;
pub mod lane;
pub mod partner;
pub mod state;
pub mod truck_type;

pub use block::{Block, Card, FaqEntry, Fact, Link, Part};
pub use compose::{Composition, PageSections, Section, SectionDef, compose};
pub use fallback::{CONTACT_HREF, DEFAULT_IMAGE};
