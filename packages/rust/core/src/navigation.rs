//! The site navigation tree.
//!
//! Three levels at most: top item, region or category, leaf. Partner and
//! truck-type entries come from the catalog so the menu never lists a page
//! the registry cannot resolve.

use serde::Serialize;

use dispatchpages_registry::Catalog;
use dispatchpages_shared::Result;
use dispatchpages_shared::paths::partner_path;

/// One node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Stable id, unique among siblings.
    pub id: String,
    pub label: String,
    pub href: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn leaf(label: impl Into<String>, href: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: title_to_slug(&label),
            label,
            href: href.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<NavItem>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Direct child by id.
    pub fn child(&self, id: &str) -> Option<&NavItem> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Depth of the subtree rooted here (a leaf is 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(NavItem::depth).max().unwrap_or(0)
    }
}

/// Lowercase, `&` to `and`, runs of anything else to `-`.
pub fn title_to_slug(title: &str) -> String {
    let lowered = title.trim().to_lowercase().replace('&', "and");
    let mut slug = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_owned()
}

// ---------------------------------------------------------------------------
// Static content
// ---------------------------------------------------------------------------

pub const SERVICES: [&str; 6] = [
    "Free Business Audit Report ",
    "Free Growth Checklist",
    "Free Custom 90 Day Growth Plan",
    "Rate Maximization & Negotiation",
    "Operational Growth Strategy",
    "Comprehensive Trip Planning",
];

/// Region title and the states listed under it.
pub const REGIONS: [(&str, &[&str]); 4] = [
    (
        "Northeast",
        &[
            "Connecticut",
            "Maine",
            "Massachusetts",
            "New Hampshire",
            "New Jersey",
            "New York",
            "Pennsylvania",
            "Rhode Island",
            "Vermont",
        ],
    ),
    (
        "Midwest",
        &[
            "Illinois",
            "Indiana",
            "Iowa",
            "Kansas",
            "Michigan",
            "Minnesota",
            "Missouri",
            "Nebraska",
            "North Dakota",
            "Ohio",
            "South Dakota",
            "Wisconsin",
        ],
    ),
    (
        "Southern US",
        &[
            "Alabama",
            "Arkansas",
            "Delaware",
            "Florida",
            "Georgia",
            "Kentucky",
            "Louisiana",
            "Maryland",
            "Mississippi",
            "North Carolina",
            "Oklahoma",
            "South Carolina",
            "Tennessee",
            "Texas",
            "Virginia",
            "West Virginia",
        ],
    ),
    (
        "Western US",
        &[
            "Alaska",
            "Arizona",
            "California",
            "Colorado",
            "Hawaii",
            "Idaho",
            "Montana",
            "Nevada",
            "New Mexico",
            "Oregon",
            "Utah",
            "Washington",
            "Wyoming",
        ],
    ),
];

// ---------------------------------------------------------------------------
// Tree construction
// ---------------------------------------------------------------------------

/// Build the full navigation tree.
pub fn navigation(catalog: &Catalog) -> Result<Vec<NavItem>> {
    let partners = catalog
        .partners()?
        .get_all()
        .iter()
        .map(|p| NavItem {
            id: p.slug.clone(),
            ..NavItem::leaf(&p.display_name, partner_path(&p.slug))
        })
        .collect();

    let trucks = catalog
        .truck_types()?
        .get_all()
        .iter()
        .map(|t| NavItem {
            id: t.slug.clone(),
            ..NavItem::leaf(&t.name, format!("/truck-type/{}", t.slug))
        })
        .collect();

    Ok(vec![
        NavItem::leaf("Home", "/"),
        NavItem::leaf("About", "/about").with_children(vec![
            NavItem::leaf("About Us", "/about"),
            NavItem::leaf("About Our Partners", "/about-our-partners").with_children(partners),
        ]),
        NavItem::leaf("Growth Plans", "/growth-plans"),
        NavItem::leaf("Services", "/services").with_children(
            SERVICES
                .iter()
                .map(|title| NavItem::leaf(title.trim(), format!("/services#{}", title_to_slug(title))))
                .collect(),
        ),
        NavItem::leaf("Areas We Serve", "/areas-we-serve").with_children(regions()),
        NavItem::leaf("Truck Type", "/truck-type").with_children(trucks),
        NavItem::leaf("Blog", "/blog"),
        NavItem::leaf("Contact", "/contact"),
    ])
}

/// The four regions with their states.
pub fn regions() -> Vec<NavItem> {
    REGIONS
        .iter()
        .map(|(region, states)| {
            let region_slug = title_to_slug(region);
            let region_href = format!("/areas-we-serve/{region_slug}");
            let children = states
                .iter()
                .map(|state| NavItem::leaf(*state, format!("{region_href}/{}", title_to_slug(state))))
                .collect();
            NavItem::leaf(*region, region_href).with_children(children)
        })
        .collect()
}

/// Find an item anywhere in the tree by href.
pub fn find_by_href<'a>(items: &'a [NavItem], href: &str) -> Option<&'a NavItem> {
    items.iter().find_map(|item| {
        if item.href == href {
            Some(item)
        } else {
            find_by_href(&item.children, href)
        }
    })
}
