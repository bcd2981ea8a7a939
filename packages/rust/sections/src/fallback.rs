//! Small helpers for "absent or empty" and the shared headline templates.

use crate::block::{Block, Card};

/// Image used when an entity carries none of its own.
pub const DEFAULT_IMAGE: &str = "https://res.cloudinary.com/dj9r2zjpm/image/upload/v1771672055/pexels-alban-mehmeti-184979123-13682891_d93x7i.jpg";

pub const CONTACT_HREF: &str = "/contact";

/// The list, if present and non-empty.
pub fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|items| !items.is_empty())
}

/// The text, if present and not blank.
pub fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// A required string field, treated as absent when blank.
pub fn required(value: &str) -> Option<&str> {
    Some(value).filter(|s| !s.trim().is_empty())
}

/// First element of the list, else `default`.
pub fn first_or<'a>(list: &'a Option<Vec<String>>, default: &'a str) -> &'a str {
    non_empty(list)
        .and_then(|items| items.first())
        .map(String::as_str)
        .unwrap_or(default)
}

// ---------------------------------------------------------------------------
// Headlines
// ---------------------------------------------------------------------------

pub fn state_h1(state_name: &str, abbreviation: &str) -> String {
    format!("{state_name} Truck Dispatcher | {abbreviation} Freight Loads & Dispatch Services")
}

pub fn lane_h1(origin: &str, destination: &str) -> String {
    format!("{origin} to {destination} Freight Loads | Truck Dispatch Services")
}

pub fn state_cta_headline(state_name: &str) -> String {
    format!("Get Professional {state_name} Truck Dispatching Services")
}

pub fn lane_cta_headline(origin: &str, destination: &str) -> String {
    format!("Need help running {origin} to {destination} consistently?")
}

/// The growth-accelerator call to action shared by state and lane pages.
pub(crate) fn growth_cta(heading: String, description: String, image: &str, alt: String) -> Block {
    Block::new("cta", heading)
        .eyebrow("GROWTH ACCELERATOR")
        .paragraph(description)
        .cards(vec![
            Card::new(
                "Secure Your Strategy:",
                "Apply for your FREE Custom 90-Day Growth Plan (a $1,500 value). This begins your Business Audit to pinpoint Revenue Leaks and define your profit targets.",
            ),
            Card::new(
                "Guarantee Your GROWTH:",
                "Start your 90-day partnership to implement the plan. We back it with our \"Growth or Your Money Back\" Guarantee.",
            ),
        ])
        .action("Get Started Today", CONTACT_HREF)
        .image(image, alt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_are_equivalent() {
        assert!(non_empty::<String>(&None).is_none());
        assert!(non_empty::<String>(&Some(vec![])).is_none());
        assert_eq!(non_empty(&Some(vec![1, 2])), Some(&[1, 2][..]));

        assert!(text(&None).is_none());
        assert!(text(&Some("  ".into())).is_none());
        assert_eq!(text(&Some("x".into())), Some("x"));
        assert!(required("").is_none());
    }

    #[test]
    fn first_or_falls_back() {
        assert_eq!(first_or(&None, "key cities"), "key cities");
        assert_eq!(first_or(&Some(vec![]), "key cities"), "key cities");
        assert_eq!(first_or(&Some(vec!["Dallas".into()]), "key cities"), "Dallas");
    }

    #[test]
    fn headline_templates() {
        assert_eq!(
            state_h1("Texas", "TX"),
            "Texas Truck Dispatcher | TX Freight Loads & Dispatch Services"
        );
        assert_eq!(
            lane_cta_headline("Origin", "Destination"),
            "Need help running Origin to Destination consistently?"
        );
    }
}
