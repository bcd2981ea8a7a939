//! State page: fourteen sections.

use dispatchpages_shared::StateEntity;
use dispatchpages_shared::paths::lane_path;

use crate::block::{Block, Card, FaqEntry, Fact, Link, Part};
use crate::compose::{PageSections, SectionDef};
use crate::fallback::{
    CONTACT_HREF, DEFAULT_IMAGE, first_or, growth_cta, non_empty, state_cta_headline, state_h1,
    text,
};

/// Most lanes listed on a state page.
pub const MAX_LISTED_LANES: usize = 15;

/// Most lanes suggested as backhaul options.
pub const MAX_BACKHAUL_LANES: usize = 6;

const BORDER_STATES: &[&str] = &["texas", "california", "arizona", "new-mexico"];

pub const SECTIONS: &[SectionDef<StateEntity>] = &[
    SectionDef::new("hero", hero),
    SectionDef::new("overview", overview),
    SectionDef::new("market-info", market_info),
    SectionDef::new("high-demand-lanes", high_demand_lanes),
    SectionDef::new("key-industries", key_industries),
    SectionDef::new("seasonal-trends", seasonal_trends),
    SectionDef::new("freight-hubs", freight_hubs),
    SectionDef::new("parking-fuel", parking_fuel),
    SectionDef::new("weigh-stations", weigh_stations),
    SectionDef::new("rate-trends", rate_trends),
    SectionDef::new("deadhead-strategy", deadhead_strategy),
    SectionDef::new("dispatcher-insights", dispatcher_insights),
    SectionDef::new("faq", faq),
    SectionDef::new("cta", cta),
];

impl PageSections for StateEntity {
    const SECTIONS: &'static [SectionDef<Self>] = SECTIONS;
}

pub fn hero(state: &StateEntity) -> Option<Block> {
    Some(
        Block::new("hero", state_h1(&state.display_name, &state.abbreviation))
            .paragraph(&state.tagline)
            .image(&state.hero_image, format!("{} Truck Dispatch", state.display_name)),
    )
}

pub fn overview(state: &StateEntity) -> Option<Block> {
    let image = text(&state.content_image).map(|src| Part::Image {
        src: src.to_owned(),
        alt: state.display_name.clone(),
    });
    let paragraph = text(&state.overview).map(|o| Part::Paragraph { text: o.to_owned() });
    let benefits = non_empty(&state.benefits).map(|b| Part::List {
        title: None,
        items: b.to_vec(),
    });

    Some(
        Block::new("overview", format!("{} Truck Dispatch Services", state.display_name))
            .eyebrow(format!("{} DISPATCH OVERVIEW", state.display_name.to_uppercase()))
            .part_opt(image)
            .paragraph(&state.long_description)
            .part_opt(paragraph)
            .part_opt(benefits)
            .action("Contact Us Now", CONTACT_HREF),
    )
}

pub fn market_info(state: &StateEntity) -> Option<Block> {
    let market = text(&state.market_overview);
    let rates = text(&state.average_rates);
    let trends = non_empty(&state.market_trends);
    if market.is_none() && rates.is_none() && trends.is_none() {
        return None;
    }

    Some(
        Block::new("market-info", format!("{} Freight Market", state.display_name))
            .eyebrow("MARKET INFORMATION")
            .part_opt(market.map(|m| Part::Paragraph { text: m.to_owned() }))
            .part_opt(rates.map(|r| Part::Facts {
                facts: vec![Fact::new("Average Rates", r)],
            }))
            .part_opt(trends.map(|t| Part::List {
                title: Some("Market Trends".into()),
                items: t.to_vec(),
            })),
    )
}

pub fn high_demand_lanes(state: &StateEntity) -> Option<Block> {
    if state.lanes.is_empty() {
        return None;
    }

    let links = state
        .lanes
        .iter()
        .take(MAX_LISTED_LANES)
        .map(|lane| {
            let body = if lane.description.trim().is_empty() {
                text(&lane.long_description).unwrap_or_default()
            } else {
                lane.description.as_str()
            };
            let mut meta = Vec::new();
            if let Some(rate) = text(&lane.average_rate) {
                meta.push(Fact::new("Rate", rate));
            }
            if let Some(distance) = text(&lane.distance) {
                meta.push(Fact::new("Distance", distance));
            }
            Link {
                title: lane.display_name.clone(),
                href: lane_path(&state.slug, &lane.slug),
                body: body.to_owned(),
                meta,
            }
        })
        .collect();

    Some(
        Block::new("high-demand-lanes", format!("Popular Freight Lanes in {}", state.display_name))
            .eyebrow("HIGH-DEMAND LANES")
            .part(Part::Links { links }),
    )
}

pub fn key_industries(state: &StateEntity) -> Option<Block> {
    let industries = non_empty(&state.key_industries)?;
    Some(
        Block::new("key-industries", format!("Major Industries in {}", state.display_name))
            .eyebrow("KEY INDUSTRIES")
            .list(None, industries.iter().cloned()),
    )
}

pub fn seasonal_trends(state: &StateEntity) -> Option<Block> {
    let considerations = non_empty(&state.seasonal_considerations)?;
    let name = &state.display_name;

    let quarters = ["Q1 (Jan-Mar)", "Q2 (Apr-Jun)", "Q3 (Jul-Sep)", "Q4 (Oct-Dec)"]
        .into_iter()
        .map(|label| {
            Card::new(
                label,
                "Rate Movement: Monitor market trends and adjust rates accordingly. \
                 Weather Impact: Consider seasonal weather patterns affecting routes. \
                 Strategy: Optimize positioning and booking timing.",
            )
        })
        .collect();

    Some(
        Block::new("seasonal-trends", format!("Seasonal Trends in {name}"))
            .eyebrow("SEASONAL ANALYSIS")
            .paragraph(format!(
                "Understanding seasonal patterns is crucial for maximizing profitability. Here's a quarterly breakdown of rate movements, weather impacts, and strategic recommendations for {name}."
            ))
            .cards(quarters)
            .list(Some("Additional Seasonal Considerations"), considerations.iter().cloned()),
    )
}

pub fn freight_hubs(state: &StateEntity) -> Option<Block> {
    let cities = non_empty(&state.major_cities)?;
    let name = &state.display_name;

    let mut cards = vec![
        Card::new(
            "Ports",
            format!("{name} features major ports that handle significant freight volumes. Check specific port details for your route."),
        ),
        Card::new(
            "Intermodal Centers",
            format!("Strategic intermodal facilities connect rail and truck freight across {name}."),
        ),
    ];
    if BORDER_STATES.contains(&state.slug.as_str()) {
        cards.push(Card::new(
            "Border Crossings",
            format!("{name} has important border crossing points. Ensure proper documentation and compliance for international freight."),
        ));
    }

    Some(
        Block::new("freight-hubs", format!("Major Freight Hubs in {name}"))
            .eyebrow("FREIGHT INFRASTRUCTURE")
            .paragraph(format!(
                "{name} is home to critical freight infrastructure including distribution cities, ports, intermodal centers, and border crossings that drive the state's logistics network."
            ))
            .list(Some("Distribution Cities"), cities.iter().cloned())
            .cards(cards),
    )
}

pub fn parking_fuel(state: &StateEntity) -> Option<Block> {
    let name = &state.display_name;
    let hub = first_or(&state.major_cities, "key cities");

    Some(
        Block::new("parking-fuel", format!("Truck Parking & Fuel in {name}"))
            .eyebrow("DRIVER RESOURCES")
            .paragraph(format!(
                "Practical information about truck parking and fuel availability to help you plan your routes through {name}. This builds driver trust and ensures smooth operations."
            ))
            .paragraph(format!(
                "{name} has numerous major truck stops along major highways including I-10, I-20, I-40, I-70, and other key corridors. Popular chains like Pilot, Love's, TA, and Flying J provide comprehensive services."
            ))
            .list(
                Some("Major Truck Stops"),
                [
                    "Full-service facilities with showers, restaurants, and maintenance",
                    "24/7 fuel availability at major locations",
                    "Convenient locations near major freight corridors",
                ],
            )
            .list(
                Some("Parking Difficulty"),
                [
                    "Plan ahead for parking in metro areas",
                    "Consider rest areas as backup options",
                    "Use parking apps to find available spots",
                ],
            )
            .facts(vec![
                Fact::new(
                    "Major Distribution Centers",
                    format!("Position near major distribution hubs in {hub} for quick access to outbound loads."),
                ),
                Fact::new(
                    "High-Volume Corridors",
                    "Stay near high-traffic freight corridors to catch backhaul opportunities.",
                ),
                Fact::new(
                    "Timing",
                    "Arrive at destination areas during peak booking times (typically early morning) for best rate opportunities.",
                ),
            ]),
    )
}

pub fn weigh_stations(state: &StateEntity) -> Option<Block> {
    let name = &state.display_name;
    let rules = non_empty(&state.regulations).map(|r| Part::List {
        title: Some("State-Specific Rules".into()),
        items: r.to_vec(),
    });
    let carb = (state.slug == "california").then(|| Part::Paragraph {
        text: "Emission Laws (CARB): California has strict CARB (California Air Resources Board) emission requirements. Ensure your vehicle meets current CARB standards before entering California. Non-compliant vehicles may face fines and restrictions.".into(),
    });

    Some(
        Block::new("weigh-stations", format!("Weigh Stations & Regulations in {name}"))
            .eyebrow("COMPLIANCE & REGULATIONS")
            .paragraph(format!("{name} follows standard federal weight limits:"))
            .facts(vec![
                Fact::new("Single Axle", "20,000 lbs"),
                Fact::new("Tandem Axle", "34,000 lbs"),
                Fact::new("Gross Vehicle Weight", "80,000 lbs (standard)"),
                Fact::new("Width", "8.5 feet (102 inches)"),
                Fact::new("Height", "13.5 feet (varies by route)"),
                Fact::new("Length", "53 feet (trailer), varies by state"),
            ])
            .part_opt(rules)
            .list(
                Some(format!("{name} may require special permits for:").as_str()),
                [
                    "Oversized/overweight loads",
                    "Hazardous materials",
                    "Special route requirements",
                ],
            )
            .part_opt(carb),
    )
}

pub fn rate_trends(state: &StateEntity) -> Option<Block> {
    let name = &state.display_name;
    let driver = first_or(&state.key_industries, "key sectors");

    Some(
        Block::new("rate-trends", format!("Rate Trends: 10-Year Analysis for {name}"))
            .eyebrow("MARKET ANALYSIS")
            .paragraph(format!(
                "Over the past decade, {name} has experienced significant rate fluctuations:"
            ))
            .facts(vec![
                Fact::new("2018-2019: Strong Market", "Rates reached peak levels due to capacity constraints"),
                Fact::new("2020: COVID Impact", "Initial volatility followed by strong recovery"),
                Fact::new("2021-2022: Peak Period", "Record-high rates driven by demand surge"),
                Fact::new("2023-2024: Market Correction", "Normalization with seasonal variations"),
            ])
            .paragraph(format!(
                "Based on current market indicators and historical patterns, {name} is expected to see moderate growth, traditional Q2-Q3 strength, and improved balance between supply and demand."
            ))
            .list(
                Some(format!("What Drives Rates in {name}").as_str()),
                [
                    "Freight volume and demand".to_owned(),
                    "Available truck capacity".to_owned(),
                    "Fuel costs and operating expenses".to_owned(),
                    format!("Major industry activity ({driver})"),
                    "Port and intermodal traffic".to_owned(),
                    "Seasonal commodity movements".to_owned(),
                ],
            ),
    )
}

pub fn deadhead_strategy(state: &StateEntity) -> Option<Block> {
    let name = &state.display_name;
    let hub = first_or(&state.major_cities, "key cities");

    let backhaul = (!state.high_demand_lanes.is_empty()).then(|| Part::Cards {
        cards: state
            .high_demand_lanes
            .iter()
            .take(MAX_BACKHAUL_LANES)
            .map(|lane| {
                let mut body = lane.description.clone();
                if let Some(rate) = &lane.rate {
                    body.push_str(&format!(" Rate: {rate}"));
                }
                Card::new(&lane.name, body.trim().to_owned())
            })
            .collect(),
    });

    Some(
        Block::new("deadhead-strategy", format!("Deadhead Strategy for {name}"))
            .eyebrow("OPTIMIZATION STRATEGY")
            .paragraph("Strategic guidance on minimizing deadhead miles and optimizing backhaul opportunities. Understanding outbound vs. inbound patterns is crucial for profitability.")
            .cards(vec![
                Card::new(
                    "Outbound Loads",
                    format!("{name} typically sees strong outbound freight volumes, especially from major distribution hubs. Outbound loads from {name} often command premium rates due to high demand."),
                ),
                Card::new(
                    "Inbound Loads",
                    format!("Inbound loads to {name} vary by region and industry. Major metropolitan areas and distribution centers typically have consistent inbound freight."),
                ),
            ])
            .part_opt(backhaul)
            .facts(vec![
                Fact::new(
                    "Position Near Distribution Hubs",
                    format!("Stay close to major distribution centers in {hub} for quick access to outbound loads and backhaul opportunities."),
                ),
                Fact::new(
                    "Time Your Arrivals",
                    "Arrive at destination areas during peak booking times (typically early morning) to secure better rates and backhaul options.",
                ),
                Fact::new(
                    "Leverage High-Volume Corridors",
                    "Position along high-traffic freight corridors to catch both outbound and inbound opportunities.",
                ),
                Fact::new(
                    "Use Load Boards Strategically",
                    "Monitor load boards before arriving at destination to pre-book backhaul loads and minimize wait time.",
                ),
            ]),
    )
}

/// The eight tactical insights shown on a state page.
pub fn insights(state: &StateEntity) -> Vec<String> {
    let name = &state.display_name;
    let metro = first_or(&state.major_cities, "major metro");
    let industry = first_or(&state.key_industries, "primary industry");

    vec![
        format!("In {name}, timing is everything. Book outbound loads early in the week when rates are typically 10-15% higher."),
        format!("The {metro} area sees the highest load volume, but don't ignore secondary markets - they often offer better rates with less competition."),
        format!("Weather patterns in {name} can create sudden rate spikes. Monitor forecasts and position yourself ahead of storms for premium rates."),
        format!("Backhaul opportunities are strongest on routes connecting {name} to neighboring states. Plan your positioning accordingly."),
        format!("Many brokers in {name} prefer working with dispatchers who understand local regulations. Build relationships with regional brokers."),
        format!("Peak booking times in {name} are typically 6-9 AM. Have your truck positioned and ready to accept loads during these hours."),
        format!("The {industry} sector drives significant freight volume. Understanding their shipping patterns gives you a competitive edge."),
        format!("Don't overlook smaller lanes within {name}. While major routes get attention, secondary routes often have less competition and better rates."),
    ]
}

pub fn dispatcher_insights(state: &StateEntity) -> Option<Block> {
    let name = &state.display_name;
    let cards = insights(state)
        .into_iter()
        .enumerate()
        .map(|(i, insight)| Card::numbered(format!("Insight #{}", i + 1), "", insight))
        .collect();

    Some(
        Block::new("dispatcher-insights", format!("Professional Dispatcher Insights for {name}"))
            .eyebrow("PROFESSIONAL INSIGHTS")
            .paragraph(format!(
                "Experience-based tactical insights that provide real value and differentiate from generic content. These lessons come from years of dispatching in {name}."
            ))
            .cards(cards),
    )
}

/// The eight question/answer pairs shown on a state page.
pub fn faqs(state: &StateEntity) -> Vec<FaqEntry> {
    let name = &state.display_name;
    let industry = first_or(&state.key_industries, "primary industry");
    let metro = first_or(&state.major_cities, "primary metro");

    let entry = |question: String, answer: String| FaqEntry { question, answer };
    vec![
        entry(
            format!("Do I need state authority to operate in {name}?"),
            format!("Yes, you need proper authority to operate in {name}. This typically includes USDOT number, MC number, and state-specific permits. Some states require additional registrations. Consult with a compliance expert to ensure you have all necessary authority before operating in {name}."),
        ),
        entry(
            format!("What insurance is required for trucking in {name}?"),
            format!("Minimum insurance requirements include primary liability coverage (typically $750,000-$1,000,000), cargo insurance, and physical damage coverage. {name} may have additional requirements depending on the type of freight you're hauling. Always verify current insurance requirements with your insurance provider and state authorities."),
        ),
        entry(
            format!("What pays best in {name}?"),
            format!("Premium rates in {name} typically come from specialized freight including refrigerated loads, flatbed freight, and time-sensitive deliveries. The {industry} sector often offers competitive rates. Outbound loads from major distribution hubs also command premium rates."),
        ),
        entry(
            format!("Is {name} good for new owner operators?"),
            format!("{name} offers opportunities for new owner operators, especially with strong freight volume and diverse industries. However, competition can be high in major metro areas. New operators should focus on building relationships with reliable brokers, understanding local regulations, and starting with established lanes before expanding."),
        ),
        entry(
            format!("What are the best lanes from {name}?"),
            format!("Top lanes from {name} include routes to major distribution hubs in neighboring states, cross-country routes to high-demand markets, and lanes connecting to major ports. The {metro} area typically has the highest volume of outbound freight."),
        ),
        entry(
            format!("How do I find loads in {name}?"),
            format!("Load finding in {name} involves using load boards, building relationships with brokers, working with dispatchers, and understanding peak booking times. Major load boards like DAT, Truckstop.com, and 123Loadboard have strong coverage in {name}. Many successful operators also work with professional dispatchers who have established broker relationships."),
        ),
        entry(
            format!("What are the seasonal trends in {name}?"),
            format!("{name} experiences seasonal variations based on industry activity, weather patterns, and commodity movements. Generally, Q2 and Q3 see stronger rates due to increased freight volume. Q1 can be slower, while Q4 often sees peak activity. Understanding these patterns helps with strategic planning and rate negotiation."),
        ),
        entry(
            format!("What permits do I need for {name}?"),
            format!("Permit requirements in {name} depend on your operation type. Standard operations require USDOT and MC numbers. Oversized/overweight loads, hazardous materials, and special routes may require additional permits. Some states have specific fuel tax permits or temporary registration requirements. Always verify current requirements before operating."),
        ),
    ]
}

pub fn faq(state: &StateEntity) -> Option<Block> {
    Some(
        Block::new(
            "faq",
            format!("Frequently Asked Questions About {} Truck Dispatching", state.display_name),
        )
        .eyebrow("FREQUENTLY ASKED QUESTIONS")
        .part(Part::Faq { entries: faqs(state) }),
    )
}

pub fn cta(state: &StateEntity) -> Option<Block> {
    let name = &state.display_name;
    let headline = text(&state.cta_headline)
        .map(str::to_owned)
        .unwrap_or_else(|| state_cta_headline(name));
    let description = text(&state.cta_description)
        .map(str::to_owned)
        .unwrap_or_else(|| {
            format!("Maximize your revenue and minimize deadhead miles with our expert dispatch services in {name}.")
        });
    let image = Some(state.hero_image.as_str())
        .filter(|s| !s.trim().is_empty())
        .or_else(|| text(&state.content_image))
        .unwrap_or(DEFAULT_IMAGE);

    Some(growth_cta(headline, description, image, format!("{name} Dispatch Services")))
}

#[cfg(test)]
mod tests {
    use dispatchpages_registry::Catalog;

    use super::*;
    use crate::compose::{assert_only_skipped, compose};

    fn state(slug: &str) -> StateEntity {
        Catalog::builtin()
            .states()
            .unwrap()
            .get_by_slug(slug)
            .cloned()
            .unwrap()
    }

    #[test]
    fn fourteen_sections_in_order() {
        let ids: Vec<&str> = SECTIONS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 14);
        assert_eq!(ids.first(), Some(&"hero"));
        assert_eq!(ids.last(), Some(&"cta"));
    }

    #[test]
    fn state_without_lanes_skips_lane_section_but_lists_industries() {
        let ohio = state("ohio");
        assert!(ohio.high_demand_lanes.is_empty());

        assert!(high_demand_lanes(&ohio).is_none());
        let industries = key_industries(&ohio).expect("industries render");
        assert_eq!(industries.item_count(), 3);

        let page = ohio.compose();
        assert!(page.skipped.contains(&"high-demand-lanes"));
        assert!(page.block("key-industries").is_some());
        assert_eq!(page.blocks.len() + page.skipped.len(), 14);
    }

    #[test]
    fn lanes_link_to_canonical_paths() {
        let texas = state("texas");
        let block = high_demand_lanes(&texas).unwrap();
        let Part::Links { links } = &block.parts[0] else {
            panic!("expected links");
        };
        assert_eq!(links.len(), 3);
        assert_eq!(
            links[0].href,
            "/states/texas-truck-dispatch-service/lanes/dallas-to-atlanta-truck-dispatch-service"
        );
        assert_eq!(links[0].meta.len(), 2);
        assert!(links[2].meta.is_empty());
    }

    #[test]
    fn hero_uses_h1_template() {
        let block = hero(&state("texas")).unwrap();
        assert_eq!(
            block.heading,
            "Texas Truck Dispatcher | TX Freight Loads & Dispatch Services"
        );
    }

    #[test]
    fn market_info_requires_some_market_data() {
        let mut ohio = state("ohio");
        assert!(market_info(&ohio).is_none());

        ohio.market_trends = Some(vec![]);
        assert!(market_info(&ohio).is_none());

        ohio.average_rates = Some("$2.10/mile".into());
        let block = market_info(&ohio).unwrap();
        assert_eq!(block.parts.len(), 1);
    }

    #[test]
    fn city_and_industry_fallbacks() {
        let ohio = state("ohio");
        assert!(ohio.major_cities.is_none());

        let all = insights(&ohio).join(" ");
        assert!(all.contains("The major metro area"));
        assert!(all.contains("The Automotive sector"));

        let answers: Vec<String> = faqs(&ohio).into_iter().map(|f| f.answer).collect();
        assert!(answers.iter().any(|a| a.contains("The primary metro area")));

        let parking = parking_fuel(&ohio).unwrap();
        let json = serde_json::to_string(&parking).unwrap();
        assert!(json.contains("distribution hubs in key cities"));

        let texas = state("texas");
        assert!(insights(&texas).join(" ").contains("The Dallas area"));
    }

    #[test]
    fn border_and_emission_paragraphs_are_state_specific() {
        let hubs = |s: &StateEntity| serde_json::to_string(&freight_hubs(s).unwrap()).unwrap();
        assert!(hubs(&state("texas")).contains("Border Crossings"));
        assert!(!hubs(&state("illinois")).contains("Border Crossings"));
        assert!(freight_hubs(&state("ohio")).is_none());

        let weigh = |s: &StateEntity| weigh_stations(s).unwrap().paragraph_text();
        assert!(weigh(&state("california")).contains("CARB"));
        assert!(!weigh(&state("texas")).contains("CARB"));
    }

    #[test]
    fn deadhead_lists_at_most_six_backhaul_lanes() {
        let mut texas = state("texas");
        let lane = texas.high_demand_lanes[0].clone();
        texas.high_demand_lanes = vec![lane; 9];

        let block = deadhead_strategy(&texas).unwrap();
        let backhaul = block
            .parts
            .iter()
            .filter_map(|p| match p {
                Part::Cards { cards } => Some(cards.len()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(backhaul, vec![2, MAX_BACKHAUL_LANES]);

        texas.high_demand_lanes.clear();
        let block = deadhead_strategy(&texas).unwrap();
        assert_eq!(block.item_count(), 2 + 4);
    }

    #[test]
    fn cta_fallback_precedence() {
        let texas = state("texas");
        assert_eq!(cta(&texas).unwrap().heading, "Keep Your Truck Loaded Across Texas");

        let ohio = state("ohio");
        let block = cta(&ohio).unwrap();
        assert_eq!(block.heading, "Get Professional Ohio Truck Dispatching Services");
        assert!(block.paragraph_text().starts_with("Maximize your revenue"));

        let mut bare = ohio.clone();
        bare.hero_image.clear();
        bare.content_image = Some("https://img.example/content.jpg".into());
        let image = |b: &Block| {
            b.parts.iter().find_map(|p| match p {
                Part::Image { src, .. } => Some(src.clone()),
                _ => None,
            })
        };
        assert_eq!(image(&cta(&bare).unwrap()).as_deref(), Some("https://img.example/content.jpg"));

        bare.content_image = None;
        assert_eq!(image(&cta(&bare).unwrap()).as_deref(), Some(DEFAULT_IMAGE));
    }

    #[test]
    fn clearing_lanes_only_drops_the_lane_section() {
        let texas = state("texas");
        let full = compose(&texas, SECTIONS);

        let mut cleared = texas.clone();
        cleared.lanes.clear();
        assert_only_skipped(&full, &compose(&cleared, SECTIONS), "high-demand-lanes", &[]);
    }

    #[test]
    fn clearing_industries_only_drops_the_industry_section() {
        let texas = state("texas");
        assert!(texas.key_industries.as_ref().is_some_and(|k| !k.is_empty()));
        let full = compose(&texas, SECTIONS);

        for empty in [None, Some(vec![])] {
            let mut cleared = texas.clone();
            cleared.key_industries = empty;
            assert_only_skipped(
                &full,
                &compose(&cleared, SECTIONS),
                "key-industries",
                &["rate-trends", "dispatcher-insights", "faq"],
            );
        }
    }

    #[test]
    fn faq_and_insights_have_eight_entries() {
        let texas = state("texas");
        assert_eq!(faqs(&texas).len(), 8);
        assert_eq!(dispatcher_insights(&texas).unwrap().item_count(), 8);
    }
}
