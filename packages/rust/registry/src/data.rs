//! Compiled-in catalog data and JSON loaders.

use std::path::Path;

use dispatchpages_shared::{
    DispatchPagesError, Entity, PartnerEntity, Result, StateEntity, TruckTypeEntity,
};
use serde::de::DeserializeOwned;

const TRUCK_TYPES_JSON: &str = include_str!("../data/truck_types.json");
const PARTNERS_JSON: &str = include_str!("../data/partners.json");

/// Embedded state documents, in file-name order.
const STATE_DOCUMENTS: &[(&str, &str)] = &[
    ("california.json", include_str!("../data/states/california.json")),
    ("illinois.json", include_str!("../data/states/illinois.json")),
    ("ohio.json", include_str!("../data/states/ohio.json")),
    ("texas.json", include_str!("../data/states/texas.json")),
];

/// The compiled-in truck types, in factory order.
pub fn builtin_truck_types() -> Result<Vec<TruckTypeEntity>> {
    parse_list("truck_types.json", TRUCK_TYPES_JSON)
}

/// The compiled-in partners, in factory order.
pub fn builtin_partners() -> Result<Vec<PartnerEntity>> {
    parse_list("partners.json", PARTNERS_JSON)
}

/// The compiled-in states with their nested lanes.
pub fn builtin_states() -> Result<Vec<StateEntity>> {
    STATE_DOCUMENTS
        .iter()
        .map(|(name, json)| parse_one(name, json))
        .collect()
}

/// Load every `*.json` state document in `dir`, sorted by file name.
pub fn load_states_dir(dir: &Path) -> Result<Vec<StateEntity>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DispatchPagesError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DispatchPagesError::io(dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut states = Vec::with_capacity(paths.len());
    for path in &paths {
        let json = std::fs::read_to_string(path).map_err(|e| DispatchPagesError::io(path, e))?;
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        tracing::debug!(file = %name, "loading state document");
        states.push(parse_one(&name, &json)?);
    }

    tracing::info!(dir = %dir.display(), count = states.len(), "loaded state documents");
    Ok(states)
}

/// Parse a JSON array of entities.
pub fn parse_list<E: Entity + DeserializeOwned>(source: &str, json: &str) -> Result<Vec<E>> {
    serde_json::from_str(json).map_err(|e| malformed::<E>(source, e))
}

/// Parse a single JSON entity document.
pub fn parse_one<E: Entity + DeserializeOwned>(source: &str, json: &str) -> Result<E> {
    serde_json::from_str(json).map_err(|e| malformed::<E>(source, e))
}

fn malformed<E: Entity>(source: &str, err: serde_json::Error) -> DispatchPagesError {
    DispatchPagesError::configuration(E::CATEGORY, format!("malformed {source}: {err}"))
}
