//! Lane page: eleven sections.

use dispatchpages_shared::LaneEntity;

use crate::block::{Block, Card, Fact, Part};
use crate::compose::{PageSections, SectionDef};
use crate::fallback::{
    CONTACT_HREF, DEFAULT_IMAGE, growth_cta, lane_cta_headline, non_empty, text,
};

/// Illustrative images shown next to the freight-type list.
pub const FREIGHT_IMAGES: [&str; 4] = [
    DEFAULT_IMAGE,
    "https://res.cloudinary.com/dj9r2zjpm/image/upload/v1770805462/box-truck_fgn0t6.jpg",
    "https://res.cloudinary.com/dj9r2zjpm/image/upload/v1770805461/reefer_spd2ee.jpg",
    "https://res.cloudinary.com/dj9r2zjpm/image/upload/v1770805461/hotshot_jwfc9x.jpg",
];

const MAX_FREIGHT_TYPES: usize = 6;
const MAX_CHALLENGES: usize = 3;
const MAX_TIPS: usize = 5;

/// Challenges this short get the generic explanation instead of their own text.
const SHORT_CHALLENGE_CHARS: usize = 50;

const GENERIC_CHALLENGE_BODY: &str = "Understanding and preparing for this challenge helps optimize your operations and maximize profitability on this lane.";

/// Card titles used when a challenge has no text of its own.
const CHALLENGE_TITLES: [&str; 3] = [
    "Long Distance Planning",
    "Weather Considerations",
    "Fuel Cost Management",
];

pub const SECTIONS: &[SectionDef<LaneEntity>] = &[
    SectionDef::new("hero", hero),
    SectionDef::new("overview", overview),
    SectionDef::new("freight-types", freight_types),
    SectionDef::new("challenges", challenges),
    SectionDef::new("benefits", benefits),
    SectionDef::new("commodities", commodities),
    SectionDef::new("seasonal-behavior", seasonal_behavior),
    SectionDef::new("rate-negotiation", rate_negotiation),
    SectionDef::new("backhaul-strategy", backhaul_strategy),
    SectionDef::new("dispatcher-tips", dispatcher_tips),
    SectionDef::new("cta", cta),
];

impl PageSections for LaneEntity {
    const SECTIONS: &'static [SectionDef<Self>] = SECTIONS;
}

pub fn hero(lane: &LaneEntity) -> Option<Block> {
    let image = text(&lane.hero_image).unwrap_or(DEFAULT_IMAGE);
    Some(
        Block::new("hero", &lane.display_name)
            .eyebrow("FREIGHT LANE")
            .paragraph(&lane.description)
            .image(image, format!("{} Freight Lane", lane.display_name)),
    )
}

pub fn overview(lane: &LaneEntity) -> Option<Block> {
    let body = text(&lane.long_description).unwrap_or(lane.description.as_str());
    let image = text(&lane.content_image)
        .or_else(|| text(&lane.hero_image))
        .unwrap_or(DEFAULT_IMAGE);

    let facts: Vec<Fact> = [
        ("Origin", &lane.origin),
        ("Destination", &lane.destination),
        ("Distance", &lane.distance),
        ("Transit Time", &lane.average_transit_time),
        ("Average Rate", &lane.average_rate),
        ("Rate per Mile", &lane.rate_per_mile),
    ]
    .into_iter()
    .filter_map(|(label, value)| text(value).map(|v| Fact::new(label, v)))
    .collect();

    let features = non_empty(&lane.key_features).map(|f| Part::List {
        title: None,
        items: f.to_vec(),
    });

    Some(
        Block::new("overview", &lane.display_name)
            .eyebrow("LANE INFORMATION")
            .paragraph(body)
            .part_opt((!facts.is_empty()).then_some(Part::Facts { facts }))
            .part_opt(features)
            .action("Contact Us Now", CONTACT_HREF)
            .image(image, format!("{} Freight Lane Overview", lane.display_name)),
    )
}

pub fn freight_types(lane: &LaneEntity) -> Option<Block> {
    let types = non_empty(&lane.freight_types)?;

    let mut block = Block::new("freight-types", "Common Freight Types")
        .eyebrow("FREIGHT TYPES")
        .paragraph("Understanding the types of freight that move on this lane helps you prepare your equipment and optimize your operations for maximum profitability.")
        .list(None, types.iter().take(MAX_FREIGHT_TYPES).cloned());
    for (i, src) in FREIGHT_IMAGES.iter().enumerate() {
        block = block.image(*src, format!("Freight type {}", i + 1));
    }
    Some(block)
}

/// Card title for a challenge: the text before its first period.
pub fn challenge_title(challenge: &str, index: usize) -> String {
    let head = challenge.split('.').next().unwrap_or_default().trim();
    if !head.is_empty() {
        return head.to_owned();
    }
    let prefix: String = challenge.trim().chars().take(30).collect();
    if !prefix.is_empty() {
        return prefix.to_uppercase();
    }
    CHALLENGE_TITLES[index % CHALLENGE_TITLES.len()].to_owned()
}

/// Card body for a challenge: its own text when long enough.
pub fn challenge_body(challenge: &str) -> &str {
    if challenge.chars().count() > SHORT_CHALLENGE_CHARS {
        challenge
    } else {
        GENERIC_CHALLENGE_BODY
    }
}

pub fn challenges(lane: &LaneEntity) -> Option<Block> {
    let list = non_empty(&lane.challenges)?;
    let cards = list
        .iter()
        .take(MAX_CHALLENGES)
        .enumerate()
        .map(|(i, c)| Card::new(challenge_title(c, i), challenge_body(c)))
        .collect();

    Some(
        Block::new("challenges", "Common Challenges")
            .eyebrow("CHALLENGES & SOLUTIONS")
            .cards(cards),
    )
}

pub fn benefits(lane: &LaneEntity) -> Option<Block> {
    let list = non_empty(&lane.benefits)?;
    Some(
        Block::new("benefits", "Key Benefits")
            .eyebrow("BENEFITS")
            .list(None, list.iter().cloned()),
    )
}

pub fn commodities(lane: &LaneEntity) -> Option<Block> {
    let freight = non_empty(&lane.freight_types).unwrap_or_default();

    let primary = non_empty(&lane.primary_commodities)
        .map(<[String]>::to_vec)
        .or_else(|| (!freight.is_empty()).then(|| freight.iter().take(4).cloned().collect()))
        .map(|items| Part::List {
            title: Some("Primary Commodities".into()),
            items,
        })
        .unwrap_or_else(|| Part::Paragraph {
            text: "Primary Commodities: This lane handles a variety of primary commodities including general freight, consumer goods, and industrial products.".into(),
        });

    let secondary: Vec<Part> = match non_empty(&lane.secondary_commodities) {
        Some(items) => vec![Part::List {
            title: Some("Secondary Commodities".into()),
            items: items.to_vec(),
        }],
        None => vec![
            Part::Paragraph {
                text: "Secondary freight on this lane includes specialized cargo, partial loads, and less-than-truckload (LTL) shipments. These loads often offer good rates with less competition.".into(),
            },
            Part::List {
                title: Some("Secondary Commodities".into()),
                items: vec![
                    "Specialized equipment freight".into(),
                    "Partial and LTL shipments".into(),
                    "Time-sensitive deliveries".into(),
                ],
            },
        ],
    };

    let seasonal = non_empty(&lane.seasonal_cargo)
        .or_else(|| non_empty(&lane.peak_seasons))
        .map(|items| Part::List {
            title: Some("Peak seasons for this lane:".into()),
            items: items.to_vec(),
        })
        .unwrap_or_else(|| Part::Paragraph {
            text: "Seasonal Cargo: Seasonal cargo patterns vary by commodity type. Monitor load boards for seasonal trends.".into(),
        });

    let additional = (freight.len() > 5).then(|| Part::List {
        title: Some("Additional Freight Types".into()),
        items: freight[5..].to_vec(),
    });

    let mut block = Block::new("commodities", "What Moves on This Lane?")
        .eyebrow("FREIGHT ANALYSIS")
        .paragraph(format!(
            "Detailed breakdown of what freight moves on the {} lane, including primary commodities, secondary freight, and seasonal cargo patterns.",
            lane.display_name
        ))
        .part(primary);
    for part in secondary {
        block = block.part(part);
    }
    Some(block.part(seasonal).part_opt(additional))
}

pub fn seasonal_behavior(lane: &LaneEntity) -> Option<Block> {
    let name = &lane.display_name;
    let both_ends = text(&lane.origin).is_some() && text(&lane.destination).is_some();

    let mut cards = vec![
        Card::new(
            "Q1 (Jan-Mar): Slow Period?",
            "Q1 typically sees slower freight volumes as businesses recover from holiday seasons. However, this can vary by lane and commodity type.",
        ),
        Card::new(
            "Q4 (Oct-Dec): Peak Period?",
            "Q4 often sees peak activity with holiday shipping, retail preparation, and year-end business activity driving high demand.",
        ),
    ];
    if both_ends {
        cards.push(Card::new(
            "Produce Season?",
            "Routes connecting agricultural regions may see produce season activity. Monitor for refrigerated load opportunities during peak harvest periods.",
        ));
        cards.push(Card::new(
            "Hurricane Risk?",
            "Routes through coastal regions (June-November) may be affected by hurricane season. Monitor weather forecasts and be prepared for route disruptions and rate volatility.",
        ));
    }

    let peaks = non_empty(&lane.peak_seasons).map(|p| Part::List {
        title: Some("Peak Seasons".into()),
        items: p.to_vec(),
    });

    Some(
        Block::new("seasonal-behavior", format!("Seasonal Behavior: {name}"))
            .eyebrow("SEASONAL ANALYSIS")
            .paragraph(format!(
                "Analysis of seasonal patterns, peak periods, and risk factors for the {name} lane. Understanding these patterns helps optimize booking timing and rate negotiation."
            ))
            .cards(cards)
            .part_opt(peaks)
            .paragraph(format!(
                "Understanding seasonal patterns on the {name} lane helps optimize your booking strategy. Plan ahead for peak periods, position yourself for seasonal commodities, and monitor weather patterns that could impact rates and routes."
            )),
    )
}

pub fn rate_negotiation(lane: &LaneEntity) -> Option<Block> {
    let name = &lane.display_name;
    Some(
        Block::new("rate-negotiation", format!("Rate Negotiation Strategy: {name}"))
            .eyebrow("RATE STRATEGY")
            .paragraph(format!(
                "Strategic guidance on rate negotiation and optimal booking timing for the {name} lane. Understanding when to book, which brokers pay more, and when to avoid can significantly impact your profitability."
            ))
            .list(
                Some("When to Book"),
                [
                    "Early Morning (6-9 AM) - Peak booking times with best rate opportunities",
                    "Monday-Wednesday - Strongest rates early in the week",
                    "Pre-Weekend - Time-sensitive loads often pay premium",
                ],
            )
            .list(
                Some("What Brokers Pay More"),
                [
                    "Time-Sensitive Freight - Hot loads with tight delivery windows",
                    "Specialized Equipment - Reefer, flatbed, or specialized trailers",
                    "Reliable Carriers - Established relationships command better rates",
                ],
            )
            .list(
                Some("When to Avoid"),
                [
                    "Low-Ball Offers - Rates significantly below market average",
                    "Unreliable Brokers - Check broker ratings and payment history",
                    "Peak Competition Times - Friday afternoons often have rate pressure",
                ],
            )
            .facts(vec![
                Fact::new("Know Your Costs", "Calculate your cost per mile including fuel, maintenance, and deadhead. Never accept rates below your break-even point."),
                Fact::new("Market Research", "Check current market rates on load boards before negotiating. Use this data to support your rate requests."),
                Fact::new("Build Relationships", "Consistent work with reliable brokers often leads to better rates over time. Prioritize relationship-building."),
                Fact::new("Timing Matters", "Book early in the week and early in the day for best rates. Last-minute loads can command premiums but also carry risks."),
            ]),
    )
}

pub fn backhaul_strategy(lane: &LaneEntity) -> Option<Block> {
    let name = &lane.display_name;
    let from_destination = text(&lane.destination).map(|d| Part::Paragraph {
        text: format!("From {d}, the best return opportunities typically come from:"),
    });

    Some(
        Block::new("backhaul-strategy", format!("Backhaul Strategy: {name}"))
            .eyebrow("BACKHAUL OPTIMIZATION")
            .paragraph(format!(
                "Strategic guidance on minimizing deadhead and finding profitable return loads on the {name} lane. Understanding backhaul opportunities is crucial for maximizing profitability."
            ))
            .part_opt(from_destination)
            .list(
                Some("Best Return Cities"),
                [
                    "Major distribution hubs near destination",
                    "Industrial areas with consistent freight",
                    "Port cities (if applicable)",
                    "Metro areas with high freight volume",
                ],
            )
            .facts(vec![
                Fact::new("Low Risk (0-20%)", "Major metro areas with high freight volume"),
                Fact::new("Moderate Risk (21-40%)", "Secondary markets with decent volume"),
                Fact::new("High Risk (41%+)", "Rural or low-volume destinations"),
            ])
            .list(
                Some("Alternative Routes"),
                [
                    "Slight detours to high-volume areas",
                    "Positioning near distribution centers",
                    "Multi-stop routes for better rates",
                    "Connecting to adjacent high-demand lanes",
                ],
            ),
    )
}

/// Tips shown on the lane page, at most five.
///
/// Authored tips win even when the list is empty; otherwise the default
/// templates are used.
pub fn tips(lane: &LaneEntity) -> Vec<String> {
    let tips = match &lane.tips {
        Some(authored) => authored.clone(),
        None => {
            let name = &lane.display_name;
            let destination = text(&lane.destination).unwrap_or("destination");
            vec![
                format!("On the {name} lane, book early in the week (Monday-Wednesday) when rates are typically 10-15% higher than weekend rates."),
                format!("Position yourself near {destination} distribution centers the night before delivery for quick access to backhaul loads."),
                "Weather patterns can create sudden rate spikes on this lane. Monitor forecasts and position ahead of storms for premium rates.".into(),
                "Many brokers prefer working with dispatchers who understand this specific lane. Build relationships with regional brokers for better rates.".into(),
                "Peak booking times are 6-9 AM. Have your truck positioned and ready to accept loads during these hours for best opportunities.".into(),
            ]
        }
    };
    tips.into_iter().take(MAX_TIPS).collect()
}

pub fn dispatcher_tips(lane: &LaneEntity) -> Option<Block> {
    let name = &lane.display_name;
    let cards = tips(lane)
        .into_iter()
        .enumerate()
        .map(|(i, tip)| Card::numbered(format!("Tip #{}", i + 1), "", tip))
        .collect();

    Some(
        Block::new("dispatcher-tips", format!("Dispatcher Insider Tips: {name}"))
            .eyebrow("INSIDER TIPS")
            .paragraph(format!(
                "Practical, insider tips that provide real value and drive conversions. These tactical pieces of advice come from years of experience dispatching on the {name} lane."
            ))
            .cards(cards),
    )
}

pub fn cta(lane: &LaneEntity) -> Option<Block> {
    let headline = text(&lane.cta_headline).map(str::to_owned).unwrap_or_else(|| {
        lane_cta_headline(
            text(&lane.origin).unwrap_or("Origin"),
            text(&lane.destination).unwrap_or("Destination"),
        )
    });
    let description = text(&lane.cta_description)
        .unwrap_or("Our dispatch team secures premium loads on this lane.")
        .to_owned();
    let image = text(&lane.hero_image)
        .or_else(|| text(&lane.content_image))
        .unwrap_or(DEFAULT_IMAGE);

    Some(growth_cta(
        headline,
        description,
        image,
        format!("{} Dispatch Services", lane.display_name),
    ))
}
