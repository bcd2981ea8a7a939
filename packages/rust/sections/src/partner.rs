//! Partner page: four sections, all of which always render.

use dispatchpages_shared::PartnerEntity;

use crate::block::{Block, Card, Part};
use crate::compose::{PageSections, SectionDef};
use crate::fallback::{CONTACT_HREF, non_empty, text};

pub const PARTNER_BANNER: &str =
    "https://res.cloudinary.com/dj9r2zjpm/image/upload/v1770962704/page-banner_cb6nff.jpg";

pub const PARTNER_CTA_IMAGE: &str = "https://res.cloudinary.com/dj9r2zjpm/image/upload/v1770178795/joseph-paul-jOi8CLM2aaI-unsplash_hytc3b.jpg";

const STRENGTHS_FALLBACK: &str =
    "This partner brings significant value through their market position and industry expertise.";

pub const SECTIONS: &[SectionDef<PartnerEntity>] = &[
    SectionDef::new("hero", hero),
    SectionDef::new("overview", overview),
    SectionDef::new("relationship", relationship),
    SectionDef::new("cta", cta),
];

impl PageSections for PartnerEntity {
    const SECTIONS: &'static [SectionDef<Self>] = SECTIONS;
}

pub fn hero(partner: &PartnerEntity) -> Option<Block> {
    let banner = text(&partner.hero_image).unwrap_or(PARTNER_BANNER);
    Some(
        Block::new("hero", &partner.name)
            .eyebrow(&partner.tagline)
            .paragraph(&partner.overview)
            .image(banner, format!("{} partnership", partner.display_name)),
    )
}

pub fn overview(partner: &PartnerEntity) -> Option<Block> {
    let image = text(&partner.partner_image).map(|src| Part::Image {
        src: src.to_owned(),
        alt: partner.display_name.clone(),
    });

    Some(
        Block::new("overview", format!("About {}", partner.display_name))
            .eyebrow("OVERVIEW")
            .paragraph(&partner.long_description)
            .list(Some("Core Services"), partner.core_services.iter().cloned())
            .part_opt(image),
    )
}

pub fn relationship(partner: &PartnerEntity) -> Option<Block> {
    let why_choose = text(&partner.why_choose);

    let mut cards = Vec::with_capacity(3);
    if let Some(why) = why_choose {
        cards.push(Card::numbered(
            "01",
            format!("Why Choose {}", partner.display_name),
            why,
        ));
    }
    cards.push(Card::numbered(
        "02",
        "Strengths & Market Position",
        strengths(partner),
    ));
    cards.push(Card::numbered("03", "Our Partnership", &partner.relationship));

    Some(
        Block::new("relationship", "Partnership Highlights")
            .eyebrow("WHY IT MATTERS")
            .cards(cards),
    )
}

pub fn cta(partner: &PartnerEntity) -> Option<Block> {
    Some(
        Block::new("cta", &partner.cta)
            .paragraph(format!(
                "Partner with Grow Trucking to access premium {} freight opportunities. Get your free consultation today!",
                partner.display_name
            ))
            .action("Contact Us Now", CONTACT_HREF)
            .image(PARTNER_CTA_IMAGE, "Partner with Grow Trucking"),
    )
}

/// Strengths as one sentence run, else the why-choose text, else a generic line.
pub fn strengths(partner: &PartnerEntity) -> String {
    if let Some(list) = non_empty(&partner.strengths) {
        return format!("{}.", list.join(". "));
    }
    text(&partner.why_choose)
        .unwrap_or(STRENGTHS_FALLBACK)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use dispatchpages_registry::Catalog;

    use super::*;

    fn partner(slug: &str) -> PartnerEntity {
        Catalog::builtin()
            .partners()
            .unwrap()
            .get_by_slug(slug)
            .cloned()
            .unwrap()
    }

    #[test]
    fn every_section_renders() {
        let page = partner("arrive-logistics").compose();
        assert_eq!(page.ids(), vec!["hero", "overview", "relationship", "cta"]);
        assert!(page.skipped.is_empty());
    }

    #[test]
    fn strengths_join_into_sentences() {
        let p = partner("c-h-robinson-worldwide-inc");
        let s = strengths(&p);
        assert!(s.starts_with("One of the largest freight brokers"));
        assert!(s.contains("modes. Data-driven"));
        assert!(s.ends_with("optimization."));
    }

    #[test]
    fn strengths_fall_back_to_why_choose_then_generic() {
        let p = partner("rxo");
        assert_eq!(strengths(&p), p.why_choose.clone().unwrap());

        let p = partner("mode-global");
        assert_eq!(strengths(&p), STRENGTHS_FALLBACK);
    }

    #[test]
    fn why_choose_card_only_when_authored() {
        let with = relationship(&partner("rxo")).unwrap();
        assert_eq!(with.item_count(), 3);

        let without = relationship(&partner("wwex-group")).unwrap();
        assert_eq!(without.item_count(), 2);
    }

    #[test]
    fn hero_uses_banner_without_custom_image() {
        let block = hero(&partner("mode-global")).unwrap();
        assert!(
            block
                .parts
                .iter()
                .any(|p| matches!(p, Part::Image { src, .. } if src == PARTNER_BANNER))
        );
    }

    #[test]
    fn cta_names_the_partner() {
        let p = partner("uber-freight");
        let block = cta(&p).unwrap();
        assert!(block.paragraph_text().contains(&format!("premium {} freight", p.display_name)));
    }
}
