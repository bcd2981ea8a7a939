//! Page composition: resolve an entity, fold its sections, attach metadata
//! and structured data.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use dispatchpages_registry::Catalog;
use dispatchpages_sections::fallback::lane_h1;
use dispatchpages_sections::{Block, Link, PageSections, Part};
use dispatchpages_shared::paths::{lane_path, partner_path, state_path, truck_type_path};
use dispatchpages_shared::{
    DispatchPagesError, Entity, LaneEntity, PageKind, PartnerEntity, Result, SiteConfig,
    StateEntity, TruckTypeEntity,
};

use crate::routes::{IndexPage, PageRef};
use crate::schema::{
    SchemaGenerator, ServiceProjection, lane_projection, state_projection, truck_type_projection,
};

/// A fully composed page, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedPage {
    pub path: String,
    pub kind: PageKind,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub blocks: Vec<Block>,
    /// Ids of sections that had nothing to show.
    pub skipped: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl ComposedPage {
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_ids(&self) -> Vec<&'static str> {
        self.blocks.iter().map(|b| b.id).collect()
    }
}

// ---------------------------------------------------------------------------
// Page entities
// ---------------------------------------------------------------------------

/// An entity that becomes a page: its sections plus page-level metadata.
pub trait PageEntity: PageSections + Entity {
    const KIND: PageKind;

    fn path(&self) -> String;
    fn title(&self) -> String;
    fn description(&self) -> String;
    fn keywords(&self) -> Vec<String>;

    /// Input for the schema generator; `None` means the page carries no schema.
    fn projection(&self) -> Option<ServiceProjection>;
}

impl PageEntity for StateEntity {
    const KIND: PageKind = PageKind::State;

    fn path(&self) -> String {
        state_path(&self.slug)
    }
    fn title(&self) -> String {
        self.meta_title.clone()
    }
    fn description(&self) -> String {
        self.meta_description.clone()
    }
    fn keywords(&self) -> Vec<String> {
        self.keywords.clone()
    }
    fn projection(&self) -> Option<ServiceProjection> {
        Some(state_projection(self))
    }
}

impl PageEntity for LaneEntity {
    const KIND: PageKind = PageKind::Lane;

    fn path(&self) -> String {
        lane_path(&self.state_slug, &self.slug)
    }
    fn title(&self) -> String {
        self.meta_title.clone().unwrap_or_else(|| {
            lane_h1(
                self.origin.as_deref().unwrap_or(self.display_name.as_str()),
                self.destination.as_deref().unwrap_or_default(),
            )
        })
    }
    fn description(&self) -> String {
        self.meta_description
            .clone()
            .unwrap_or_else(|| self.description.clone())
    }
    fn keywords(&self) -> Vec<String> {
        self.keywords.clone().unwrap_or_default()
    }
    fn projection(&self) -> Option<ServiceProjection> {
        Some(lane_projection(self))
    }
}

impl PageEntity for TruckTypeEntity {
    const KIND: PageKind = PageKind::TruckType;

    fn path(&self) -> String {
        truck_type_path(&self.slug)
    }
    fn title(&self) -> String {
        self.meta_title.clone()
    }
    fn description(&self) -> String {
        self.meta_description.clone()
    }
    fn keywords(&self) -> Vec<String> {
        self.keywords.clone()
    }
    fn projection(&self) -> Option<ServiceProjection> {
        Some(truck_type_projection(self))
    }
}

impl PageEntity for PartnerEntity {
    const KIND: PageKind = PageKind::Partner;

    fn path(&self) -> String {
        partner_path(&self.slug)
    }
    fn title(&self) -> String {
        self.meta_title.clone()
    }
    fn description(&self) -> String {
        self.meta_description.clone()
    }
    fn keywords(&self) -> Vec<String> {
        self.keywords.clone()
    }
    fn projection(&self) -> Option<ServiceProjection> {
        None
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Compose a page for an entity the caller already holds.
pub fn compose_entity<E: PageEntity>(entity: &E, schema: &dyn SchemaGenerator) -> ComposedPage {
    let composition = entity.compose();
    debug!(
        kind = %E::KIND,
        slug = entity.slug(),
        rendered = composition.blocks.len(),
        skipped = composition.skipped.len(),
        "composed page"
    );

    ComposedPage {
        path: entity.path(),
        kind: E::KIND,
        title: entity.title(),
        description: entity.description(),
        keywords: entity.keywords(),
        blocks: composition.blocks,
        skipped: composition.skipped,
        schema: entity.projection().map(|p| schema.generate(&p)),
    }
}

/// Look up the entity behind `page` and compose it.
#[instrument(skip_all, fields(path = %page.path()))]
pub fn compose_page(
    catalog: &Catalog,
    page: &PageRef,
    site: &SiteConfig,
    schema: &dyn SchemaGenerator,
) -> Result<ComposedPage> {
    Ok(match page {
        PageRef::State { state } => compose_entity(catalog.states()?.require(state)?, schema),
        PageRef::Lane { state, lane } => {
            let entity = catalog
                .lanes()?
                .get(state, lane)
                .ok_or_else(|| DispatchPagesError::not_found(LaneEntity::CATEGORY, format!("{state}/{lane}")))?;
            compose_entity(entity, schema)
        }
        PageRef::TruckType { slug } => compose_entity(catalog.truck_types()?.require(slug)?, schema),
        PageRef::Partner { slug } => compose_entity(catalog.partners()?.require(slug)?, schema),
        PageRef::Index(index) => compose_index(catalog, *index, site)?,
    })
}

/// A listing page linking every entity of one category in factory order.
pub fn compose_index(catalog: &Catalog, index: IndexPage, site: &SiteConfig) -> Result<ComposedPage> {
    let links: Vec<Link> = match index {
        IndexPage::States => catalog
            .states()?
            .get_all()
            .iter()
            .map(|s| link(&s.display_name, state_path(&s.slug), &s.description))
            .collect(),
        IndexPage::TruckTypes => catalog
            .truck_types()?
            .get_all()
            .iter()
            .map(|t| link(&t.display_name, truck_type_path(&t.slug), &t.description))
            .collect(),
        IndexPage::Partners => catalog
            .partners()?
            .get_all()
            .iter()
            .map(|p| link(&p.display_name, partner_path(&p.slug), &p.tagline))
            .collect(),
    };

    let listing = Block::new("listing", index.title()).part(Part::Links { links });

    Ok(ComposedPage {
        path: index.path().to_owned(),
        kind: PageKind::Index,
        title: format!("{} | {}", index.title(), site.company_name),
        description: format!("{} from {}.", index.title(), site.company_name),
        keywords: Vec::new(),
        blocks: vec![listing],
        skipped: Vec::new(),
        schema: None,
    })
}

fn link(title: &str, href: String, body: &str) -> Link {
    Link {
        title: title.to_owned(),
        href,
        body: body.to_owned(),
        meta: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use dispatchpages_sections::{lane, partner, state, truck_type};

    use super::*;
    use crate::schema::JsonLdServiceSchema;

    fn schema() -> JsonLdServiceSchema {
        JsonLdServiceSchema::from_site(&SiteConfig::default())
    }

    #[test]
    fn every_page_kind_keeps_its_section_count() {
        assert_eq!(state::SECTIONS.len(), 14);
        assert_eq!(lane::SECTIONS.len(), 11);
        assert_eq!(truck_type::SECTIONS.len(), 15);
        assert_eq!(partner::SECTIONS.len(), 4);
    }

    #[test]
    fn rendered_plus_skipped_covers_the_section_list() {
        let catalog = Catalog::builtin();
        let page = compose_page(
            &catalog,
            &PageRef::State {
                state: "ohio".into(),
            },
            &SiteConfig::default(),
            &schema(),
        )
        .unwrap();

        assert_eq!(page.blocks.len() + page.skipped.len(), 14);
        assert!(page.skipped.contains(&"high-demand-lanes"));
        assert!(page.block("key-industries").is_some());
        assert_eq!(page.path, "/states/ohio-truck-dispatch-service");
        assert_eq!(page.schema.as_ref().unwrap()["@type"], "Service");
    }

    #[test]
    fn partners_carry_no_schema() {
        let catalog = Catalog::builtin();
        let page = compose_page(
            &catalog,
            &PageRef::Partner { slug: "rxo".into() },
            &SiteConfig::default(),
            &schema(),
        )
        .unwrap();
        assert!(page.schema.is_none());
        assert_eq!(page.block_ids(), vec!["hero", "overview", "relationship", "cta"]);
    }

    #[test]
    fn missing_entity_is_not_found() {
        let catalog = Catalog::builtin();
        let err = compose_page(
            &catalog,
            &PageRef::Lane {
                state: "ohio".into(),
                lane: "nowhere".into(),
            },
            &SiteConfig::default(),
            &schema(),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn index_lists_in_factory_order() {
        let catalog = Catalog::builtin();
        let page = compose_index(&catalog, IndexPage::TruckTypes, &SiteConfig::default()).unwrap();
        let Some(Part::Links { links }) = page.blocks[0].parts.first() else {
            panic!("expected links");
        };
        let hrefs: Vec<&str> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs.len(), 6);
        assert_eq!(hrefs[0], "/truck-type/dry-van-dispatch-service");
        assert_eq!(hrefs[5], "/truck-type/power-only-dispatch-service");
        assert_eq!(page.title, "Truck Types We Dispatch | Grow Trucking");
    }

    #[test]
    fn lane_title_falls_back_to_headline() {
        let catalog = Catalog::builtin();
        let mut lane = catalog.lanes().unwrap().get("texas", "dallas-to-atlanta").cloned().unwrap();
        lane.meta_title = None;
        assert_eq!(
            lane.title(),
            "Dallas, TX to Atlanta Freight Loads | Truck Dispatch Services"
        );
    }
}
