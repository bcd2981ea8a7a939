//! Entity records for the four page categories.
//!
//! Entities are immutable, compiled-in data deserialized from camelCase JSON.
//! Optional fields are semantically meaningful: absence means "nothing to
//! show", never "broken record". Cross-category references are slugs only.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A slug-keyed record in one category.
pub trait Entity {
    /// Category name used in diagnostics and routing (e.g., `"state"`).
    const CATEGORY: &'static str;

    /// Unique slug within the category.
    fn slug(&self) -> &str;

    /// Human-readable label.
    fn display_name(&self) -> &str;

    /// Key under which the registry stores this entity.
    fn registry_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.slug())
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// One U.S. state page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateEntity {
    pub slug: String,
    pub name: String,
    pub display_name: String,
    pub abbreviation: String,
    pub tagline: String,
    pub description: String,
    pub long_description: String,
    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub market_overview: Option<String>,
    #[serde(default)]
    pub average_rates: Option<String>,
    #[serde(default)]
    pub market_trends: Option<Vec<String>>,
    #[serde(default)]
    pub key_industries: Option<Vec<String>>,
    #[serde(default)]
    pub major_cities: Option<Vec<String>>,
    #[serde(default)]
    pub common_freight_types: Option<Vec<String>>,
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
    #[serde(default)]
    pub challenges: Option<Vec<String>>,
    #[serde(default)]
    pub regulations: Option<Vec<String>>,
    #[serde(default)]
    pub seasonal_considerations: Option<Vec<String>>,

    pub hero_image: String,
    #[serde(default)]
    pub content_image: Option<String>,

    pub meta_title: String,
    pub meta_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub cta_headline: Option<String>,
    #[serde(default)]
    pub cta_description: Option<String>,
    pub service_type: String,
    #[serde(default)]
    pub area_served: Option<String>,

    /// Lanes originating in this state, in authored order.
    #[serde(default)]
    pub lanes: Vec<LaneEntity>,

    /// Summaries derived from `lanes` when the catalog is built.
    #[serde(default, skip_deserializing)]
    pub high_demand_lanes: Vec<LaneSummary>,
}

/// Compact lane reference shown on state pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSummary {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    pub slug: String,
}

impl StateEntity {
    /// Attach owning-state slugs to nested lanes and derive lane summaries.
    ///
    /// A lane always belongs to the state that nests it; an authored
    /// `stateSlug` naming another state is overwritten.
    pub fn link_lanes(&mut self) {
        for lane in &mut self.lanes {
            if lane.state_slug != self.slug {
                if !lane.state_slug.is_empty() {
                    tracing::warn!(
                        lane = %lane.slug,
                        authored = %lane.state_slug,
                        owner = %self.slug,
                        "lane stateSlug does not match its owning state"
                    );
                }
                lane.state_slug = self.slug.clone();
            }
        }
        self.high_demand_lanes = self.lanes.iter().map(LaneSummary::from).collect();
    }
}

impl From<&LaneEntity> for LaneSummary {
    fn from(lane: &LaneEntity) -> Self {
        let name = if lane.display_name.is_empty() {
            lane.name.clone()
        } else {
            lane.display_name.clone()
        };
        Self {
            name,
            description: lane.description.clone(),
            rate: lane.average_rate.clone(),
            distance: lane.distance.clone(),
            slug: lane.slug.clone(),
        }
    }
}

impl Entity for StateEntity {
    const CATEGORY: &'static str = "state";

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

// ---------------------------------------------------------------------------
// Lane
// ---------------------------------------------------------------------------

/// One freight lane page, nested under its origin state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneEntity {
    pub slug: String,
    /// Owning state; always set from the parent record.
    #[serde(default)]
    pub state_slug: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,

    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub average_transit_time: Option<String>,
    #[serde(default)]
    pub average_rate: Option<String>,
    #[serde(default)]
    pub rate_per_mile: Option<String>,
    #[serde(default)]
    pub load_frequency: Option<String>,
    #[serde(default)]
    pub peak_seasons: Option<Vec<String>>,

    #[serde(default)]
    pub freight_types: Option<Vec<String>>,
    #[serde(default)]
    pub key_features: Option<Vec<String>>,
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
    #[serde(default)]
    pub challenges: Option<Vec<String>>,
    /// Authored tips; an explicitly empty list suppresses the defaults.
    #[serde(default)]
    pub tips: Option<Vec<String>>,
    #[serde(default)]
    pub primary_commodities: Option<Vec<String>>,
    #[serde(default)]
    pub secondary_commodities: Option<Vec<String>>,
    #[serde(default)]
    pub seasonal_cargo: Option<Vec<String>>,

    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub content_image: Option<String>,

    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub cta_headline: Option<String>,
    #[serde(default)]
    pub cta_description: Option<String>,
}

/// Registry key for a lane: `"{state}:{lane}"`.
pub fn lane_key(state_slug: &str, lane_slug: &str) -> String {
    format!("{state_slug}:{lane_slug}")
}

impl Entity for LaneEntity {
    const CATEGORY: &'static str = "lane";

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn registry_key(&self) -> Cow<'_, str> {
        Cow::Owned(lane_key(&self.state_slug, &self.slug))
    }
}

// ---------------------------------------------------------------------------
// Truck type
// ---------------------------------------------------------------------------

/// Title + description pair used for features and benefits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitledItem {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRate {
    pub route_type: String,
    pub rate_per_mile: String,
    pub average_load_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckLane {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub step: u32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rate_premium: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeSolution {
    pub challenge: String,
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default)]
    pub standard_rate: Option<String>,
    #[serde(default)]
    pub premium_rate: Option<String>,
    #[serde(default)]
    pub setup_fee: Option<String>,
    #[serde(default)]
    pub included: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessStory {
    pub quote: String,
    pub author: String,
    pub location: String,
    #[serde(default)]
    pub equipment: Option<String>,
}

/// One row of the trailer comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub feature: String,
    pub current_type: String,
    /// Other trailer type name -> value, in authored order.
    #[serde(default, with = "ordered_pairs")]
    pub other_types: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalHotspot {
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub weekly_revenue: Option<String>,
}

/// One truck/trailer type page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckTypeEntity {
    pub slug: String,
    pub name: String,
    pub display_name: String,
    pub tagline: String,
    pub description: String,
    pub long_description: String,
    pub key_features_description: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub hero_image: String,
    pub content_image: String,

    pub features: Vec<TitledItem>,
    pub benefits: Vec<TitledItem>,
    pub key_points: Vec<String>,

    #[serde(default)]
    pub specifications: Option<Vec<Specification>>,
    #[serde(default)]
    pub specifications_description: Option<String>,
    #[serde(default)]
    pub market_rates: Option<Vec<MarketRate>>,
    #[serde(default)]
    pub market_rates_description: Option<String>,
    #[serde(default)]
    pub high_demand_lanes: Option<Vec<TruckLane>>,
    #[serde(default)]
    pub high_demand_lanes_description: Option<String>,
    #[serde(default)]
    pub dispatch_process: Option<Vec<ProcessStep>>,
    #[serde(default)]
    pub equipment_essential: Option<Vec<EquipmentItem>>,
    #[serde(default)]
    pub equipment_premium: Option<Vec<EquipmentItem>>,
    #[serde(default)]
    pub equipment_description: Option<String>,
    #[serde(default)]
    pub challenges: Option<Vec<ChallengeSolution>>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub success_stories: Option<Vec<SuccessStory>>,
    #[serde(default)]
    pub comparison_table: Option<Vec<ComparisonRow>>,
    #[serde(default)]
    pub comparison_description: Option<String>,
    #[serde(default)]
    pub types_of_freight: Option<Vec<String>>,
    #[serde(default)]
    pub regional_hotspots: Option<Vec<RegionalHotspot>>,

    pub meta_title: String,
    pub meta_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub cta_headline: String,
    pub cta_description: String,
    pub service_type: String,
    #[serde(default)]
    pub area_served: Option<String>,
}

impl Entity for TruckTypeEntity {
    const CATEGORY: &'static str = "truck-type";

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

// ---------------------------------------------------------------------------
// Partner
// ---------------------------------------------------------------------------

/// One freight-broker partner page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerEntity {
    pub slug: String,
    pub name: String,
    pub display_name: String,
    pub tagline: String,
    pub overview: String,
    pub long_description: String,
    pub core_services: Vec<String>,
    #[serde(default)]
    pub why_choose: Option<String>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    pub relationship: String,
    pub cta: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub partner_image: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    pub meta_title: String,
    pub meta_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Entity for PartnerEntity {
    const CATEGORY: &'static str = "partner";

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Union of other-type column names across rows, in first-seen order.
pub fn comparison_columns(rows: &[ComparisonRow]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for (name, _) in &row.other_types {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }
    }
    columns
}

/// A JSON object read as ordered `(key, value)` pairs.
mod ordered_pairs {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(pairs: &[(String, String)], ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(pairs.len()))?;
        for (k, v) in pairs {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<(String, String)>, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    pairs.push((k, v));
                }
                Ok(pairs)
            }
        }

        de.deserialize_map(PairsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane_json() -> &'static str {
        r#"{
            "slug": "dallas-to-atlanta",
            "name": "Dallas to Atlanta",
            "displayName": "Dallas to Atlanta Freight",
            "description": "I-20 corridor",
            "averageRate": "$2.45/mile",
            "distance": "780 miles"
        }"#
    }

    #[test]
    fn lane_defaults_optional_fields() {
        let lane: LaneEntity = serde_json::from_str(lane_json()).expect("parse lane");
        assert!(lane.state_slug.is_empty());
        assert!(lane.tips.is_none());
        assert!(lane.origin.is_none());
    }

    fn texas(lanes: Vec<LaneEntity>) -> StateEntity {
        StateEntity {
            slug: "texas".into(),
            name: "Texas".into(),
            display_name: "Texas".into(),
            abbreviation: "TX".into(),
            tagline: String::new(),
            description: String::new(),
            long_description: String::new(),
            overview: None,
            market_overview: None,
            average_rates: None,
            market_trends: None,
            key_industries: None,
            major_cities: None,
            common_freight_types: None,
            benefits: None,
            challenges: None,
            regulations: None,
            seasonal_considerations: None,
            hero_image: String::new(),
            content_image: None,
            meta_title: String::new(),
            meta_description: String::new(),
            keywords: vec![],
            cta_headline: None,
            cta_description: None,
            service_type: String::new(),
            area_served: None,
            lanes,
            high_demand_lanes: vec![],
        }
    }

    #[test]
    fn link_lanes_fills_state_and_summaries() {
        let lane: LaneEntity = serde_json::from_str(lane_json()).expect("parse lane");
        let mut state = texas(vec![lane]);

        state.link_lanes();

        assert_eq!(state.lanes[0].state_slug, "texas");
        assert_eq!(state.lanes[0].registry_key(), "texas:dallas-to-atlanta");
        assert_eq!(state.high_demand_lanes.len(), 1);
        let summary = &state.high_demand_lanes[0];
        assert_eq!(summary.name, "Dallas to Atlanta Freight");
        assert_eq!(summary.rate.as_deref(), Some("$2.45/mile"));
        assert_eq!(summary.slug, "dallas-to-atlanta");
    }

    #[test]
    fn link_lanes_overrides_a_foreign_state_slug() {
        let mut lane: LaneEntity = serde_json::from_str(lane_json()).expect("parse lane");
        lane.state_slug = "ohio".into();
        let mut state = texas(vec![lane]);

        state.link_lanes();

        assert_eq!(state.lanes[0].state_slug, "texas");
        assert_eq!(state.lanes[0].registry_key(), "texas:dallas-to-atlanta");
    }

    #[test]
    fn comparison_row_keeps_authored_column_order() {
        let row: ComparisonRow = serde_json::from_str(
            r#"{"feature": "Load", "currentType": "Heavy", "otherTypes": {"Reefer": "Light", "Dry Van": "Medium"}}"#,
        )
        .expect("parse row");
        assert_eq!(row.other_types[0].0, "Reefer");
        assert_eq!(row.other_types[1].0, "Dry Van");
    }

    #[test]
    fn comparison_columns_keep_first_seen_order() {
        let rows = vec![
            ComparisonRow {
                feature: "Temp control".into(),
                current_type: "Yes".into(),
                other_types: vec![("Dry Van".into(), "No".into())],
            },
            ComparisonRow {
                feature: "Rate".into(),
                current_type: "High".into(),
                other_types: vec![
                    ("Flatbed".into(), "Medium".into()),
                    ("Dry Van".into(), "Low".into()),
                ],
            },
        ];
        assert_eq!(comparison_columns(&rows), vec!["Dry Van", "Flatbed"]);
    }
}
