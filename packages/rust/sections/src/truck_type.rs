//! Truck-type page: fifteen sections.
//!
//! Sections after `benefits` render only when their data is present.

use dispatchpages_shared::{EquipmentItem, TruckTypeEntity, comparison_columns};

use crate::block::{Block, Card, Fact, Part};
use crate::compose::{PageSections, SectionDef};
use crate::fallback::{CONTACT_HREF, non_empty, text};

pub const SECTIONS: &[SectionDef<TruckTypeEntity>] = &[
    SectionDef::new("hero", hero),
    SectionDef::new("overview", overview),
    SectionDef::new("features", features),
    SectionDef::new("benefits", benefits),
    SectionDef::new("specifications", specifications),
    SectionDef::new("market-rates", market_rates),
    SectionDef::new("high-demand-lanes", high_demand_lanes),
    SectionDef::new("types-of-freight", types_of_freight),
    SectionDef::new("dispatch-process", dispatch_process),
    SectionDef::new("equipment", equipment),
    SectionDef::new("challenges", challenges),
    SectionDef::new("pricing", pricing),
    SectionDef::new("success-stories", success_stories),
    SectionDef::new("comparison", comparison),
    SectionDef::new("cta", cta),
];

impl PageSections for TruckTypeEntity {
    const SECTIONS: &'static [SectionDef<Self>] = SECTIONS;
}

pub fn hero(truck: &TruckTypeEntity) -> Option<Block> {
    Some(
        Block::new("hero", format!("{} DISPATCH", truck.name.to_uppercase()))
            .paragraph(&truck.tagline)
            .part_opt(text(&truck.subtitle).map(|s| Part::Paragraph { text: s.to_owned() }))
            .image(&truck.hero_image, format!("{} - {}", truck.display_name, truck.name)),
    )
}

pub fn overview(truck: &TruckTypeEntity) -> Option<Block> {
    Some(
        Block::new("overview", &truck.display_name)
            .eyebrow(format!("WHAT IS {} DISPATCH?", truck.display_name.to_uppercase()))
            .image(&truck.content_image, &truck.display_name)
            .paragraph(&truck.long_description)
            .part_opt((!truck.key_points.is_empty()).then(|| Part::List {
                title: Some("What We Offer".into()),
                items: truck.key_points.clone(),
            }))
            .action("Contact Us Now", CONTACT_HREF),
    )
}

pub fn features(truck: &TruckTypeEntity) -> Option<Block> {
    let cards = truck
        .features
        .iter()
        .map(|f| Card::new(&f.title, &f.description))
        .collect::<Vec<_>>();

    Some(
        Block::new("features", format!("What Sets Our {} Dispatch Apart", truck.name))
            .eyebrow(format!("{} KEY FEATURES", truck.display_name.to_uppercase()))
            .paragraph(&truck.key_features_description)
            .part_opt((!cards.is_empty()).then_some(Part::Cards { cards }))
            .image(&truck.content_image, &truck.display_name),
    )
}

pub fn benefits(truck: &TruckTypeEntity) -> Option<Block> {
    Some(
        Block::new("benefits", "Why Choose Us")
            .eyebrow(format!(
                "BENEFITS OF {} DISPATCH",
                truck.display_name.to_uppercase()
            ))
            .cards(
                truck
                    .benefits
                    .iter()
                    .map(|b| Card::new(&b.title, &b.description))
                    .collect(),
            ),
    )
}

pub fn specifications(truck: &TruckTypeEntity) -> Option<Block> {
    let specs = non_empty(&truck.specifications)?;
    Some(
        Block::new(
            "specifications",
            format!("{} Specifications & Requirements", truck.display_name),
        )
        .eyebrow("SPECIFICATIONS & REQUIREMENTS")
        .part_opt(description(&truck.specifications_description))
        .facts(specs.iter().map(|s| Fact::new(&s.label, &s.value)).collect()),
    )
}

pub fn market_rates(truck: &TruckTypeEntity) -> Option<Block> {
    let rates = non_empty(&truck.market_rates)?;
    Some(
        Block::new(
            "market-rates",
            format!("Current {} Market Rates", truck.display_name),
        )
        .eyebrow("MARKET RATES")
        .part_opt(description(&truck.market_rates_description))
        .part(Part::Table {
            headers: vec![
                "Route Type".into(),
                "Rate Per Mile".into(),
                "Average Load Value".into(),
            ],
            rows: rates
                .iter()
                .map(|r| {
                    vec![
                        r.route_type.clone(),
                        r.rate_per_mile.clone(),
                        r.average_load_value.clone(),
                    ]
                })
                .collect(),
        }),
    )
}

pub fn high_demand_lanes(truck: &TruckTypeEntity) -> Option<Block> {
    let lanes = non_empty(&truck.high_demand_lanes)?;
    let cards = lanes
        .iter()
        .map(|lane| {
            let mut body = lane.description.clone();
            if let Some(rate) = text(&lane.rate) {
                body.push_str(&format!("\nRate: {rate}"));
            }
            if let Some(distance) = text(&lane.distance) {
                body.push_str(&format!("\nDistance: {distance}"));
            }
            Card::new(&lane.title, body)
        })
        .collect();

    Some(
        Block::new(
            "high-demand-lanes",
            format!("High-Demand {} Lanes", truck.display_name),
        )
        .eyebrow("HIGH-DEMAND LANES")
        .part_opt(description(&truck.high_demand_lanes_description))
        .cards(cards),
    )
}

pub fn types_of_freight(truck: &TruckTypeEntity) -> Option<Block> {
    let freight = non_empty(&truck.types_of_freight)?;
    Some(
        Block::new("types-of-freight", "Types of Freight We Dispatch")
            .eyebrow("FREIGHT TYPES")
            .paragraph(format!(
                "Our {} dispatch services cover a wide range of commodities:",
                truck.name.to_lowercase()
            ))
            .list(None, freight.iter().cloned()),
    )
}

pub fn dispatch_process(truck: &TruckTypeEntity) -> Option<Block> {
    let steps = non_empty(&truck.dispatch_process)?;
    Some(
        Block::new(
            "dispatch-process",
            format!("{} Dispatch Process", truck.display_name),
        )
        .eyebrow("DISPATCH PROCESS")
        .cards(
            steps
                .iter()
                .map(|s| Card::numbered(s.step.to_string(), &s.title, &s.description))
                .collect(),
        ),
    )
}

pub fn equipment(truck: &TruckTypeEntity) -> Option<Block> {
    let essential = non_empty(&truck.equipment_essential);
    let premium = non_empty(&truck.equipment_premium);
    if essential.is_none() && premium.is_none() {
        return None;
    }

    let essential = essential.map(|items| Part::List {
        title: Some("Essential Equipment".into()),
        items: items.iter().map(equipment_line).collect(),
    });
    let premium = premium.map(|items| Part::List {
        title: Some("Premium Add-Ons (Higher Rates)".into()),
        items: items
            .iter()
            .map(|item| match text(&item.rate_premium) {
                Some(rate) => format!("{} ({rate})", equipment_line(item)),
                None => equipment_line(item),
            })
            .collect(),
    });

    Some(
        Block::new("equipment", "Equipment Requirements & Recommendations")
            .eyebrow("EQUIPMENT REQUIREMENTS")
            .part_opt(description(&truck.equipment_description))
            .part_opt(essential)
            .part_opt(premium),
    )
}

fn equipment_line(item: &EquipmentItem) -> String {
    match text(&item.description) {
        Some(description) => format!("{}: {description}", item.name),
        None => item.name.clone(),
    }
}

pub fn challenges(truck: &TruckTypeEntity) -> Option<Block> {
    let list = non_empty(&truck.challenges)?;
    Some(
        Block::new(
            "challenges",
            format!("Common {} Challenges We Solve", truck.display_name),
        )
        .eyebrow("CHALLENGES WE SOLVE")
        .facts(
            list.iter()
                .map(|c| Fact::new(format!("Challenge: {}", c.challenge), format!("Solution: {}", c.solution)))
                .collect(),
        ),
    )
}

pub fn pricing(truck: &TruckTypeEntity) -> Option<Block> {
    let pricing = truck.pricing.as_ref()?;

    let facts: Vec<Fact> = [
        ("Standard Dispatch", &pricing.standard_rate),
        ("Premium Dispatch", &pricing.premium_rate),
        ("Setup Fee", &pricing.setup_fee),
    ]
    .into_iter()
    .filter_map(|(label, value)| text(value).map(|v| Fact::new(label, v)))
    .collect();

    let included = non_empty(&pricing.included).map(|items| Part::List {
        title: Some("What's Included:".into()),
        items: items.to_vec(),
    });

    Some(
        Block::new("pricing", format!("{} Dispatch Pricing", truck.display_name))
            .eyebrow("PRICING")
            .paragraph("Transparent, performance-based pricing with no hidden fees:")
            .part_opt((!facts.is_empty()).then_some(Part::Facts { facts }))
            .part_opt(included),
    )
}

pub fn success_stories(truck: &TruckTypeEntity) -> Option<Block> {
    let stories = non_empty(&truck.success_stories)?;
    let cards = stories
        .iter()
        .map(|s| {
            let byline = match text(&s.equipment) {
                Some(equipment) => format!("{} ({equipment}), {}", s.author, s.location),
                None => format!("{}, {}", s.author, s.location),
            };
            Card::new(byline, format!("\"{}\"", s.quote))
        })
        .collect();

    Some(
        Block::new("success-stories", "Success Stories")
            .eyebrow("SUCCESS STORIES")
            .cards(cards),
    )
}

pub fn comparison(truck: &TruckTypeEntity) -> Option<Block> {
    let rows = non_empty(&truck.comparison_table)?;
    let columns = comparison_columns(rows);

    let mut headers = vec!["Feature".to_owned(), truck.name.clone()];
    headers.extend(columns.iter().cloned());

    let table_rows = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.feature.clone(), row.current_type.clone()];
            cells.extend(columns.iter().map(|column| {
                row.other_types
                    .iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, value)| value.clone())
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| "-".to_owned())
            }));
            cells
        })
        .collect();

    Some(
        Block::new(
            "comparison",
            format!("{} vs. Other Trailer Types", truck.display_name),
        )
        .eyebrow("COMPARISON")
        .part_opt(description(&truck.comparison_description))
        .part(Part::Table {
            headers,
            rows: table_rows,
        }),
    )
}

pub fn cta(truck: &TruckTypeEntity) -> Option<Block> {
    Some(
        Block::new("cta", &truck.cta_headline)
            .paragraph(&truck.cta_description)
            .part(Part::ContactPhone)
            .action("Request Your Quote", CONTACT_HREF)
            .image(&truck.hero_image, format!("{} CTA Background", truck.display_name)),
    )
}

fn description(value: &Option<String>) -> Option<Part> {
    text(value).map(|d| Part::Paragraph { text: d.to_owned() })
}

#[cfg(test)]
mod tests {
    use dispatchpages_registry::Catalog;
    use dispatchpages_shared::{
        ChallengeSolution, ComparisonRow, MarketRate, Pricing, ProcessStep, Specification,
        SuccessStory, TruckLane,
    };

    use super::*;
    use crate::compose::assert_only_skipped;

    fn truck(slug: &str) -> TruckTypeEntity {
        Catalog::builtin()
            .truck_types()
            .unwrap()
            .get_by_slug(slug)
            .cloned()
            .unwrap()
    }

    #[test]
    fn fifteen_sections_with_optional_tail() {
        assert_eq!(SECTIONS.len(), 15);

        let page = truck("reefer").compose();
        assert_eq!(page.ids(), vec!["hero", "overview", "features", "benefits", "cta"]);
        assert_eq!(page.skipped.len(), 10);
    }

    #[test]
    fn hero_shouts_the_name() {
        let block = hero(&truck("reefer")).unwrap();
        assert_eq!(block.heading, "REEFER DISPATCH");
    }

    #[test]
    fn comparison_fills_missing_cells() {
        let mut t = truck("flatbed");
        t.comparison_table = Some(vec![
            ComparisonRow {
                feature: "Load securement".into(),
                current_type: "Chains and straps".into(),
                other_types: vec![("Dry Van".into(), "Load bars".into())],
            },
            ComparisonRow {
                feature: "Rate".into(),
                current_type: "High".into(),
                other_types: vec![
                    ("Reefer".into(), "High".into()),
                    ("Dry Van".into(), "Medium".into()),
                ],
            },
        ]);

        let block = comparison(&t).unwrap();
        let Some(Part::Table { headers, rows }) = block.parts.last() else {
            panic!("expected table");
        };
        assert_eq!(headers, &vec!["Feature", "Flatbed", "Dry Van", "Reefer"]);
        assert_eq!(rows[0], vec!["Load securement", "Chains and straps", "Load bars", "-"]);
        assert_eq!(rows[1], vec!["Rate", "High", "Medium", "High"]);
    }

    #[test]
    fn equipment_renders_with_either_list() {
        let mut t = truck("flatbed");
        assert!(equipment(&t).is_none());

        t.equipment_essential = Some(vec![]);
        assert!(equipment(&t).is_none());

        t.equipment_premium = Some(vec![EquipmentItem {
            category: "securement".into(),
            name: "Coil racks".into(),
            description: None,
            rate_premium: Some("+$0.15/mile".into()),
        }]);
        let block = equipment(&t).unwrap();
        assert_eq!(block.item_count(), 1);
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("+$0.15/mile"));
        assert!(json.contains("Premium Add-Ons"));
    }

    #[test]
    fn pricing_renders_when_present() {
        let mut t = truck("hotshot");
        assert!(pricing(&t).is_none());

        t.pricing = Some(Pricing {
            standard_rate: Some("5%".into()),
            premium_rate: None,
            setup_fee: None,
            included: None,
        });
        let block = pricing(&t).unwrap();
        assert_eq!(block.item_count(), 1);
    }

    #[test]
    fn cta_carries_contact_phone() {
        let block = cta(&truck("dry-van")).unwrap();
        assert!(block.parts.contains(&Part::ContactPhone));
    }

    /// Reefer with every optional section filled in.
    fn populated() -> TruckTypeEntity {
        let mut t = truck("reefer");
        t.specifications = Some(vec![Specification {
            label: "Length".into(),
            value: "53 ft".into(),
        }]);
        t.specifications_description = Some("Typical trailer".into());
        t.market_rates = Some(vec![MarketRate {
            route_type: "Regional".into(),
            rate_per_mile: "$2.80".into(),
            average_load_value: "$2,400".into(),
        }]);
        t.high_demand_lanes = Some(vec![TruckLane {
            title: "Salinas to Chicago".into(),
            description: "Produce".into(),
            rate: Some("$3.10/mile".into()),
            distance: None,
        }]);
        t.types_of_freight = Some(vec!["Produce".into(), "Frozen foods".into()]);
        t.dispatch_process = Some(vec![ProcessStep {
            step: 1,
            title: "Onboarding".into(),
            description: "Paperwork".into(),
        }]);
        t.equipment_essential = Some(vec![EquipmentItem {
            category: "temperature".into(),
            name: "Reefer unit".into(),
            description: Some("Multi-temp".into()),
            rate_premium: None,
        }]);
        t.equipment_premium = Some(vec![EquipmentItem {
            category: "tracking".into(),
            name: "Temp logger".into(),
            description: None,
            rate_premium: Some("+$0.10/mile".into()),
        }]);
        t.challenges = Some(vec![ChallengeSolution {
            challenge: "Tight windows".into(),
            solution: "Appointment scheduling".into(),
        }]);
        t.pricing = Some(Pricing {
            standard_rate: Some("5%".into()),
            premium_rate: Some("7%".into()),
            setup_fee: None,
            included: Some(vec!["Load booking".into()]),
        });
        t.success_stories = Some(vec![SuccessStory {
            quote: "Never empty".into(),
            author: "Sam".into(),
            location: "Fresno, CA".into(),
            equipment: None,
        }]);
        t.comparison_table = Some(vec![ComparisonRow {
            feature: "Temp control".into(),
            current_type: "Yes".into(),
            other_types: vec![("Dry Van".into(), "No".into())],
        }]);
        t
    }

    #[test]
    fn each_optional_group_controls_only_its_section() {
        let full = populated().compose();
        assert_eq!(full.blocks.len(), 15);
        assert!(full.skipped.is_empty());

        let cases: [(&str, fn(&mut TruckTypeEntity)); 10] = [
            ("specifications", |t| t.specifications = None),
            ("market-rates", |t| t.market_rates = Some(vec![])),
            ("high-demand-lanes", |t| t.high_demand_lanes = None),
            ("types-of-freight", |t| t.types_of_freight = Some(vec![])),
            ("dispatch-process", |t| t.dispatch_process = None),
            ("equipment", |t| {
                t.equipment_essential = None;
                t.equipment_premium = Some(vec![]);
            }),
            ("challenges", |t| t.challenges = None),
            ("pricing", |t| t.pricing = None),
            ("success-stories", |t| t.success_stories = Some(vec![])),
            ("comparison", |t| t.comparison_table = None),
        ];

        for (id, clear) in cases {
            let mut t = populated();
            clear(&mut t);
            assert_only_skipped(&full, &t.compose(), id, &[]);
        }
    }
}
