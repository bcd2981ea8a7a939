//! SEO structured data.
//!
//! Page composition hands a small [`ServiceProjection`] of the entity to a
//! [`SchemaGenerator`] and embeds whatever JSON comes back without looking
//! inside it.

use serde::Serialize;
use serde_json::{Map, Value, json};

use dispatchpages_shared::{LaneEntity, SiteConfig, StateEntity, TruckTypeEntity};

/// The entity fields a schema generator may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceProjection {
    pub name: String,
    pub description: String,
    pub service_type: Option<String>,
    pub area_served: Option<String>,
}

pub trait SchemaGenerator: Send + Sync {
    fn generate(&self, projection: &ServiceProjection) -> Value;
}

/// Emits a schema.org `Service` with the site as provider.
#[derive(Debug, Clone)]
pub struct JsonLdServiceSchema {
    pub provider_name: String,
    pub provider_url: Option<String>,
}

impl JsonLdServiceSchema {
    pub fn new(provider_name: impl Into<String>, provider_url: Option<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            provider_url,
        }
    }

    pub fn from_site(site: &SiteConfig) -> Self {
        Self::new(&site.company_name, Some(site.url.clone()))
    }
}

impl SchemaGenerator for JsonLdServiceSchema {
    fn generate(&self, projection: &ServiceProjection) -> Value {
        let mut schema = Map::new();
        schema.insert("@context".into(), json!("https://schema.org"));
        schema.insert("@type".into(), json!("Service"));
        schema.insert("name".into(), json!(projection.name));
        schema.insert("description".into(), json!(projection.description));

        let mut provider = Map::new();
        provider.insert("@type".into(), json!("Organization"));
        provider.insert("name".into(), json!(self.provider_name));
        if let Some(url) = self.provider_url.as_deref().filter(|u| !u.is_empty()) {
            provider.insert("url".into(), json!(url));
        }
        schema.insert("provider".into(), Value::Object(provider));

        if let Some(area) = projection.area_served.as_deref().filter(|a| !a.is_empty()) {
            schema.insert(
                "areaServed".into(),
                json!({ "@type": "Country", "name": area }),
            );
        }
        if let Some(service_type) = projection.service_type.as_deref().filter(|s| !s.is_empty()) {
            schema.insert("serviceType".into(), json!(service_type));
        }

        Value::Object(schema)
    }
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

pub fn state_projection(state: &StateEntity) -> ServiceProjection {
    ServiceProjection {
        name: format!("{} Truck Dispatch Service", state.display_name),
        description: state.meta_description.clone(),
        service_type: Some(state.service_type.clone()),
        area_served: Some(
            state
                .area_served
                .clone()
                .unwrap_or_else(|| state.display_name.clone()),
        ),
    }
}

pub fn lane_projection(lane: &LaneEntity) -> ServiceProjection {
    let area = match (lane.origin.as_deref(), lane.destination.as_deref()) {
        (Some(origin), Some(destination)) => format!("{origin} to {destination}"),
        _ => "US".to_owned(),
    };
    ServiceProjection {
        name: format!("{} Freight Lane Dispatch Service", lane.display_name),
        description: lane
            .meta_description
            .clone()
            .unwrap_or_else(|| lane.description.clone()),
        service_type: Some("Freight Lane Dispatch".to_owned()),
        area_served: Some(area),
    }
}

pub fn truck_type_projection(truck: &TruckTypeEntity) -> ServiceProjection {
    ServiceProjection {
        name: format!("{} Service", truck.display_name),
        description: truck.meta_description.clone(),
        service_type: Some(truck.service_type.clone()),
        area_served: Some(truck.area_served.clone().unwrap_or_else(|| "US".to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use dispatchpages_registry::Catalog;

    use super::*;

    #[test]
    fn service_schema_shape() {
        let generator = JsonLdServiceSchema::new("Grow Trucking", Some("https://example.com".into()));
        let schema = generator.generate(&ServiceProjection {
            name: "Reefer Dispatch Service".into(),
            description: "Cold chain".into(),
            service_type: Some("Truck Dispatch".into()),
            area_served: Some("US".into()),
        });

        assert_eq!(schema["@type"], "Service");
        assert_eq!(schema["provider"]["@type"], "Organization");
        assert_eq!(schema["provider"]["url"], "https://example.com");
        assert_eq!(schema["areaServed"]["name"], "US");
        assert_eq!(schema["serviceType"], "Truck Dispatch");
    }

    #[test]
    fn absent_parts_are_omitted() {
        let generator = JsonLdServiceSchema::new("Grow Trucking", None);
        let schema = generator.generate(&ServiceProjection {
            name: "x".into(),
            description: "y".into(),
            service_type: None,
            area_served: None,
        });
        let object = schema.as_object().unwrap();
        assert!(!object.contains_key("areaServed"));
        assert!(!object.contains_key("serviceType"));
        assert!(!schema["provider"].as_object().unwrap().contains_key("url"));
    }

    #[test]
    fn lane_area_falls_back_to_us() {
        let catalog = Catalog::builtin();
        let lanes = catalog.lanes().unwrap();

        let mut lane = lanes.get("texas", "dallas-to-atlanta").cloned().unwrap();
        let projection = lane_projection(&lane);
        assert_eq!(projection.service_type.as_deref(), Some("Freight Lane Dispatch"));
        assert!(projection.name.ends_with("Freight Lane Dispatch Service"));

        lane.destination = None;
        assert_eq!(lane_projection(&lane).area_served.as_deref(), Some("US"));
    }

    #[test]
    fn state_area_defaults_to_display_name() {
        let catalog = Catalog::builtin();
        let mut ohio = catalog.states().unwrap().get_by_slug("ohio").cloned().unwrap();
        ohio.area_served = None;
        let projection = state_projection(&ohio);
        assert_eq!(projection.area_served.as_deref(), Some(ohio.display_name.as_str()));
        assert_eq!(projection.name, format!("{} Truck Dispatch Service", ohio.display_name));
    }
}
