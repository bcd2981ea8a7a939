//! The four category registries behind one injectable handle.

use std::path::PathBuf;
use std::sync::{LazyLock, OnceLock};

use dispatchpages_shared::{
    DispatchPagesError, PartnerEntity, Result, StateEntity, TruckTypeEntity,
};
use serde::Serialize;

use crate::data;
use crate::lanes::LaneRegistry;
use crate::lazy::{LazyRegistry, configuration_message};
use crate::registry::Registry;

/// Per-category entity counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub states: usize,
    pub lanes: usize,
    pub truck_types: usize,
    pub partners: usize,
}

/// Owner of the state, lane, truck-type and partner registries.
///
/// Each registry is built independently on first access; lanes are derived
/// from the state registry. Call [`Catalog::initialize`] at startup to build
/// everything and fail fast on bad data.
pub struct Catalog {
    states: LazyRegistry<StateEntity>,
    lanes: OnceLock<std::result::Result<LaneRegistry, String>>,
    truck_types: LazyRegistry<TruckTypeEntity>,
    partners: LazyRegistry<PartnerEntity>,
}

impl Catalog {
    /// Build a catalog from one factory per category.
    ///
    /// State records have their lanes linked before they are indexed.
    pub fn new(
        states: impl Fn() -> Result<Vec<StateEntity>> + Send + Sync + 'static,
        truck_types: impl Fn() -> Result<Vec<TruckTypeEntity>> + Send + Sync + 'static,
        partners: impl Fn() -> Result<Vec<PartnerEntity>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            states: LazyRegistry::new(move || {
                let mut records = states()?;
                records.iter_mut().for_each(StateEntity::link_lanes);
                Ok(records)
            }),
            lanes: OnceLock::new(),
            truck_types: LazyRegistry::new(truck_types),
            partners: LazyRegistry::new(partners),
        }
    }

    /// A catalog over the compiled-in data.
    pub fn builtin() -> Self {
        Self::new(
            data::builtin_states,
            data::builtin_truck_types,
            data::builtin_partners,
        )
    }

    /// The compiled-in truck types and partners with states read from `dir`.
    pub fn with_states_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(
            move || data::load_states_dir(&dir),
            data::builtin_truck_types,
            data::builtin_partners,
        )
    }

    /// A catalog over fixed entity lists.
    pub fn from_entities(
        states: Vec<StateEntity>,
        truck_types: Vec<TruckTypeEntity>,
        partners: Vec<PartnerEntity>,
    ) -> Self {
        Self::new(
            move || Ok(states.clone()),
            move || Ok(truck_types.clone()),
            move || Ok(partners.clone()),
        )
    }

    pub fn states(&self) -> Result<&Registry<StateEntity>> {
        self.states.initialize()
    }

    /// Lanes of every state, built after the state registry.
    pub fn lanes(&self) -> Result<&LaneRegistry> {
        let built = self.lanes.get_or_init(|| {
            self.states()
                .and_then(|states| LaneRegistry::from_states(states.get_all()))
                .map_err(configuration_message)
        });

        built
            .as_ref()
            .map_err(|message| DispatchPagesError::configuration("lane", message.clone()))
    }

    pub fn truck_types(&self) -> Result<&Registry<TruckTypeEntity>> {
        self.truck_types.initialize()
    }

    pub fn partners(&self) -> Result<&Registry<PartnerEntity>> {
        self.partners.initialize()
    }

    /// Build every registry, returning the first configuration error.
    pub fn initialize(&self) -> Result<CatalogStats> {
        let stats = CatalogStats {
            states: self.states()?.len(),
            lanes: self.lanes()?.len(),
            truck_types: self.truck_types()?.len(),
            partners: self.partners()?.len(),
        };

        tracing::info!(
            states = stats.states,
            lanes = stats.lanes,
            truck_types = stats.truck_types,
            partners = stats.partners,
            "catalog initialized"
        );

        Ok(stats)
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("states", &self.states)
            .field("lanes_initialized", &self.lanes.get().is_some())
            .field("truck_types", &self.truck_types)
            .field("partners", &self.partners)
            .finish()
    }
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

/// Process-wide catalog over the compiled-in data.
pub fn builtin_catalog() -> &'static Catalog {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truck_types_in_factory_order() {
        let catalog = Catalog::builtin();
        let trucks = catalog.truck_types().unwrap();

        let slugs: Vec<&str> = trucks.slugs().collect();
        assert_eq!(
            slugs,
            vec!["dry-van", "reefer", "flatbed", "box-truck", "hotshot", "power-only"]
        );
        assert_eq!(
            trucks.get_by_slug("reefer").map(|t| t.display_name.as_str()),
            Some("Reefer Dispatch")
        );
        assert!(trucks.get_by_slug("tanker").is_none());
        assert!(!trucks.exists("tanker"));
    }

    #[test]
    fn builtin_catalog_initializes() {
        let stats = builtin_catalog().initialize().unwrap();
        assert_eq!(stats.truck_types, 6);
        assert_eq!(stats.partners, 10);
        assert_eq!(stats.states, 4);
        assert_eq!(stats.lanes, 6);

        let again = builtin_catalog().initialize().unwrap();
        assert_eq!(stats, again);
    }

    #[test]
    fn states_link_their_lanes() {
        let catalog = Catalog::builtin();
        let texas = catalog.states().unwrap().get_by_slug("texas").unwrap();
        assert_eq!(texas.high_demand_lanes.len(), 3);
        assert!(texas.lanes.iter().all(|l| l.state_slug == "texas"));

        let ohio = catalog.states().unwrap().get_by_slug("ohio").unwrap();
        assert!(ohio.high_demand_lanes.is_empty());
        assert!(ohio.key_industries.as_ref().is_some_and(|k| !k.is_empty()));

        let lanes = catalog.lanes().unwrap();
        assert!(lanes.exists("texas", "dallas-to-atlanta"));
        assert!(!lanes.exists("ohio", "dallas-to-atlanta"));
        assert!(lanes.for_state("ohio").is_empty());
    }

    #[test]
    fn registries_build_independently() {
        let catalog = Catalog::new(
            || Err(DispatchPagesError::validation("states unavailable")),
            data::builtin_truck_types,
            data::builtin_partners,
        );

        assert!(catalog.truck_types().is_ok());
        assert!(catalog.partners().is_ok());
        assert!(catalog.states().is_err());

        let err = catalog.lanes().unwrap_err();
        assert!(err.to_string().contains("states unavailable"));
        assert!(catalog.initialize().is_err());
    }

    #[test]
    fn duplicate_state_fails_startup() {
        let texas = data::builtin_states()
            .unwrap()
            .into_iter()
            .find(|s| s.slug == "texas")
            .unwrap();
        let catalog = Catalog::from_entities(vec![texas.clone(), texas], vec![], vec![]);

        let err = catalog.initialize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "state catalog is misconfigured: duplicate slug 'texas'"
        );
    }

    #[test]
    fn states_dir_replaces_builtin_states() {
        let dir = std::env::temp_dir().join(format!("dp-catalog-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("ohio.json"),
            include_str!("../data/states/ohio.json"),
        )
        .unwrap();

        let catalog = Catalog::with_states_dir(&dir);
        let stats = catalog.initialize().unwrap();
        assert_eq!(stats.states, 1);
        assert_eq!(stats.lanes, 0);
        assert_eq!(stats.truck_types, 6);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn states_dir_with_unsafe_slug_fails_startup() {
        let dir = std::env::temp_dir().join(format!("dp-catalog-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let ohio = include_str!("../data/states/ohio.json").replacen(
            "\"slug\": \"ohio\"",
            "\"slug\": \"../../../escaped\"",
            1,
        );
        assert!(ohio.contains("escaped"));
        std::fs::write(dir.join("ohio.json"), ohio).unwrap();

        let err = Catalog::with_states_dir(&dir).initialize().unwrap_err();
        assert!(matches!(err, DispatchPagesError::Configuration { category: "state", .. }));
        assert!(err.to_string().contains("'../../../escaped'"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
