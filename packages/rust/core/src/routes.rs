//! Path resolution and static route enumeration.
//!
//! Every page the site serves is addressed by a canonical path built in
//! [`dispatchpages_shared::paths`]. [`resolve`] maps an incoming path back to
//! the entity behind it; [`all_routes`] lists every canonical path in a fixed
//! order so that static generation and lookup never disagree.

use tracing::debug;

use dispatchpages_registry::Catalog;
use dispatchpages_shared::paths::{
    STATE_SUFFIX, TRUCK_TYPE_SUFFIX, lane_path, partner_path, state_path, truck_type_path,
};
use dispatchpages_shared::{DispatchPagesError, PageKind, Result};

pub const STATES_INDEX: &str = "/states";
pub const TRUCK_TYPES_INDEX: &str = "/truck-type";
pub const PARTNERS_INDEX: &str = "/about-our-partners";

// ---------------------------------------------------------------------------
// Page references
// ---------------------------------------------------------------------------

/// The listing pages, one per browsable category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexPage {
    States,
    TruckTypes,
    Partners,
}

impl IndexPage {
    pub fn path(self) -> &'static str {
        match self {
            Self::States => STATES_INDEX,
            Self::TruckTypes => TRUCK_TYPES_INDEX,
            Self::Partners => PARTNERS_INDEX,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::States => "Areas We Serve",
            Self::TruckTypes => "Truck Types We Dispatch",
            Self::Partners => "Our Partners",
        }
    }
}

/// A resolved page, holding slugs only. Entities are looked up again through
/// the catalog when the page is composed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageRef {
    State { state: String },
    Lane { state: String, lane: String },
    TruckType { slug: String },
    Partner { slug: String },
    Index(IndexPage),
}

impl PageRef {
    pub fn kind(&self) -> PageKind {
        match self {
            Self::State { .. } => PageKind::State,
            Self::Lane { .. } => PageKind::Lane,
            Self::TruckType { .. } => PageKind::TruckType,
            Self::Partner { .. } => PageKind::Partner,
            Self::Index(_) => PageKind::Index,
        }
    }

    /// Canonical path of this page.
    pub fn path(&self) -> String {
        match self {
            Self::State { state } => state_path(state),
            Self::Lane { state, lane } => lane_path(state, lane),
            Self::TruckType { slug } => truck_type_path(slug),
            Self::Partner { slug } => partner_path(slug),
            Self::Index(index) => index.path().to_owned(),
        }
    }
}

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(PageRef),
    /// The path names a known page under a non-canonical form.
    Redirect(String),
    NotFound,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a request path against the catalog.
///
/// An unknown slug yields [`Resolution::NotFound`]; the error case is reserved
/// for a catalog that cannot be built.
pub fn resolve(catalog: &Catalog, path: &str) -> Result<Resolution> {
    let trimmed = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    let resolution = match segments.as_slice() {
        ["states"] => Resolution::Page(PageRef::Index(IndexPage::States)),
        ["truck-type"] => Resolution::Page(PageRef::Index(IndexPage::TruckTypes)),
        ["about-our-partners"] => Resolution::Page(PageRef::Index(IndexPage::Partners)),
        ["states", state] => resolve_state(catalog, state)?,
        ["states", state, "lanes", lane] => resolve_lane(catalog, state, lane)?,
        ["truck-type", slug] => resolve_truck_type(catalog, slug)?,
        ["partners", slug] => {
            if catalog.partners()?.exists(slug) {
                Resolution::Page(PageRef::Partner {
                    slug: (*slug).to_owned(),
                })
            } else {
                Resolution::NotFound
            }
        }
        ["areas-we-serve", rest @ ..] => resolve_area(catalog, rest)?,
        _ => Resolution::NotFound,
    };

    debug!(path, ?resolution, "resolved path");
    Ok(resolution)
}

/// Resolve a path that must name a page; redirects and misses become
/// [`DispatchPagesError::NotFound`].
pub fn resolve_page(catalog: &Catalog, path: &str) -> Result<PageRef> {
    match resolve(catalog, path)? {
        Resolution::Page(page) => Ok(page),
        Resolution::Redirect(_) | Resolution::NotFound => {
            Err(DispatchPagesError::not_found("page", path))
        }
    }
}

/// Split a segment into its slug and whether it carried `suffix`.
fn strip_suffix<'a>(segment: &'a str, suffix: &str) -> (&'a str, bool) {
    match segment.strip_suffix(suffix) {
        Some(slug) if !slug.is_empty() => (slug, true),
        _ => (segment, false),
    }
}

fn resolve_state(catalog: &Catalog, segment: &str) -> Result<Resolution> {
    let (slug, canonical) = strip_suffix(segment, STATE_SUFFIX);
    if !catalog.states()?.exists(slug) {
        return Ok(Resolution::NotFound);
    }
    Ok(if canonical {
        Resolution::Page(PageRef::State {
            state: slug.to_owned(),
        })
    } else {
        Resolution::Redirect(state_path(slug))
    })
}

fn resolve_lane(catalog: &Catalog, state_segment: &str, lane_segment: &str) -> Result<Resolution> {
    let (state, state_canonical) = strip_suffix(state_segment, STATE_SUFFIX);
    let (lane, lane_canonical) = strip_suffix(lane_segment, STATE_SUFFIX);
    if !catalog.lanes()?.exists(state, lane) {
        return Ok(Resolution::NotFound);
    }
    Ok(if state_canonical && lane_canonical {
        Resolution::Page(PageRef::Lane {
            state: state.to_owned(),
            lane: lane.to_owned(),
        })
    } else {
        Resolution::Redirect(lane_path(state, lane))
    })
}

fn resolve_truck_type(catalog: &Catalog, segment: &str) -> Result<Resolution> {
    let (slug, canonical) = strip_suffix(segment, TRUCK_TYPE_SUFFIX);
    if !catalog.truck_types()?.exists(slug) {
        return Ok(Resolution::NotFound);
    }
    Ok(if canonical {
        Resolution::Page(PageRef::TruckType {
            slug: slug.to_owned(),
        })
    } else {
        Resolution::Redirect(truck_type_path(slug))
    })
}

/// `/areas-we-serve/{region}/{state}` redirects to the state page, matching
/// the last segment against slug, name or display name.
fn resolve_area(catalog: &Catalog, rest: &[&str]) -> Result<Resolution> {
    let Some(last) = rest.last() else {
        return Ok(Resolution::Redirect(STATES_INDEX.to_owned()));
    };
    let wanted = hyphenate(last);

    let found = catalog.states()?.get_all().iter().find(|state| {
        state.slug.to_lowercase() == wanted
            || hyphenate(&state.name) == wanted
            || hyphenate(&state.display_name) == wanted
    });

    Ok(Resolution::Redirect(match found {
        Some(state) => state_path(&state.slug),
        None => STATES_INDEX.to_owned(),
    }))
}

fn hyphenate(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

// ---------------------------------------------------------------------------
// Enumeration
// ---------------------------------------------------------------------------

/// Every entity page in category order (states, lanes, truck types,
/// partners), factory order within a category.
pub fn all_routes(catalog: &Catalog) -> Result<Vec<PageRef>> {
    let states = catalog.states()?;
    let lanes = catalog.lanes()?;
    let trucks = catalog.truck_types()?;
    let partners = catalog.partners()?;

    let mut routes = Vec::with_capacity(states.len() + lanes.len() + trucks.len() + partners.len());
    routes.extend(states.get_all().iter().map(|s| PageRef::State {
        state: s.slug.clone(),
    }));
    routes.extend(lanes.get_all().iter().map(|l| PageRef::Lane {
        state: l.state_slug.clone(),
        lane: l.slug.clone(),
    }));
    routes.extend(trucks.get_all().iter().map(|t| PageRef::TruckType {
        slug: t.slug.clone(),
    }));
    routes.extend(partners.get_all().iter().map(|p| PageRef::Partner {
        slug: p.slug.clone(),
    }));
    Ok(routes)
}

/// Entity pages plus the three listing pages.
pub fn site_routes(catalog: &Catalog) -> Result<Vec<PageRef>> {
    let mut routes = all_routes(catalog)?;
    routes.extend(
        [IndexPage::States, IndexPage::TruckTypes, IndexPage::Partners]
            .into_iter()
            .map(PageRef::Index),
    );
    Ok(routes)
}

/// Entity pages of one kind, in enumeration order.
pub fn routes_of_kind(catalog: &Catalog, kind: PageKind) -> Result<Vec<PageRef>> {
    Ok(site_routes(catalog)?
        .into_iter()
        .filter(|route| route.kind() == kind)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(catalog: &Catalog, path: &str) -> PageRef {
        match resolve(catalog, path).unwrap() {
            Resolution::Page(page) => page,
            other => panic!("{path}: expected page, got {other:?}"),
        }
    }

    #[test]
    fn canonical_paths_resolve() {
        let catalog = Catalog::builtin();
        assert_eq!(
            page(&catalog, "/states/texas-truck-dispatch-service"),
            PageRef::State {
                state: "texas".into()
            }
        );
        assert_eq!(
            page(
                &catalog,
                "/states/texas-truck-dispatch-service/lanes/dallas-to-atlanta-truck-dispatch-service/"
            ),
            PageRef::Lane {
                state: "texas".into(),
                lane: "dallas-to-atlanta".into()
            }
        );
        assert_eq!(
            page(&catalog, "/truck-type/reefer-dispatch-service"),
            PageRef::TruckType {
                slug: "reefer".into()
            }
        );
        assert_eq!(
            page(&catalog, "/partners/rxo"),
            PageRef::Partner { slug: "rxo".into() }
        );
        assert_eq!(
            page(&catalog, "/about-our-partners"),
            PageRef::Index(IndexPage::Partners)
        );
    }

    #[test]
    fn bare_slugs_redirect() {
        let catalog = Catalog::builtin();
        assert_eq!(
            resolve(&catalog, "/states/ohio").unwrap(),
            Resolution::Redirect("/states/ohio-truck-dispatch-service".into())
        );
        assert_eq!(
            resolve(&catalog, "/truck-type/flatbed").unwrap(),
            Resolution::Redirect("/truck-type/flatbed-dispatch-service".into())
        );
        assert_eq!(
            resolve(&catalog, "/states/texas/lanes/dallas-to-atlanta-truck-dispatch-service").unwrap(),
            Resolution::Redirect(lane_path("texas", "dallas-to-atlanta"))
        );
    }

    #[test]
    fn unknown_slugs_are_not_found() {
        let catalog = Catalog::builtin();
        for path in [
            "/truck-type/tanker-dispatch-service",
            "/states/atlantis-truck-dispatch-service",
            "/states/ohio-truck-dispatch-service/lanes/dallas-to-atlanta-truck-dispatch-service",
            "/partners/nobody",
            "/blog/some-post",
            "/",
        ] {
            assert_eq!(resolve(&catalog, path).unwrap(), Resolution::NotFound, "{path}");
        }

        let err = resolve_page(&catalog, "/truck-type/tanker").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn areas_we_serve_redirects_to_state() {
        let catalog = Catalog::builtin();
        assert_eq!(
            resolve(&catalog, "/areas-we-serve/southern-us/texas").unwrap(),
            Resolution::Redirect(state_path("texas"))
        );
        assert_eq!(
            resolve(&catalog, "/areas-we-serve/western-us/California").unwrap(),
            Resolution::Redirect(state_path("california"))
        );
        assert_eq!(
            resolve(&catalog, "/areas-we-serve/northeast/vermont").unwrap(),
            Resolution::Redirect(STATES_INDEX.into())
        );
        assert_eq!(
            resolve(&catalog, "/areas-we-serve").unwrap(),
            Resolution::Redirect(STATES_INDEX.into())
        );
    }

    #[test]
    fn every_enumerated_route_round_trips() {
        let catalog = Catalog::builtin();
        let routes = site_routes(&catalog).unwrap();
        let stats = catalog.initialize().unwrap();
        assert_eq!(
            routes.len(),
            stats.states + stats.lanes + stats.truck_types + stats.partners + 3
        );

        for route in routes {
            assert_eq!(page(&catalog, &route.path()), route);
        }
    }

    #[test]
    fn enumeration_follows_category_order() {
        let catalog = Catalog::builtin();
        let kinds: Vec<PageKind> = all_routes(&catalog).unwrap().iter().map(PageRef::kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);

        let trucks = routes_of_kind(&catalog, PageKind::TruckType).unwrap();
        assert_eq!(
            trucks.first(),
            Some(&PageRef::TruckType {
                slug: "dry-van".into()
            })
        );
    }
}
