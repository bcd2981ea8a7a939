//! Content-structure audit.
//!
//! Checks composed pages against the editorial layout each page kind is
//! written for. Findings are advisory: they are logged and returned, and only
//! a strict validation run turns them into an error.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::warn;

use dispatchpages_sections::state::MAX_LISTED_LANES;
use dispatchpages_sections::{Block, Part};
use dispatchpages_shared::{DispatchPagesError, PageKind, Result};

use crate::page::ComposedPage;

pub const INTRO_WORDS: RangeInclusive<usize> = 150..=200;
pub const INSIGHT_COUNT: RangeInclusive<usize> = 5..=8;
pub const FAQ_COUNT: RangeInclusive<usize> = 6..=8;
pub const TIP_COUNT: RangeInclusive<usize> = 2..=5;

/// One audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentIssue {
    pub path: String,
    /// Section the finding is about.
    pub section: &'static str,
    pub message: String,
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.path, self.section, self.message)
    }
}

/// Audit one composed page. Pages without editorial rules yield nothing.
pub fn audit(page: &ComposedPage) -> Vec<ContentIssue> {
    let mut issues = Vec::new();
    let mut check = |section: &'static str, actual: usize, wanted: RangeInclusive<usize>, what: &str| {
        if !wanted.contains(&actual) {
            issues.push(ContentIssue {
                path: page.path.clone(),
                section,
                message: if wanted.start() == wanted.end() {
                    format!("expected exactly {} {what}, found {actual}", wanted.start())
                } else {
                    format!(
                        "expected {} to {} {what}, found {actual}",
                        wanted.start(),
                        wanted.end()
                    )
                },
            });
        }
    };

    match page.kind {
        PageKind::State => {
            let intro = page
                .block("overview")
                .and_then(first_paragraph)
                .map(word_count)
                .unwrap_or(0);
            check("overview", intro, INTRO_WORDS, "intro words");

            let lanes = count(page, "high-demand-lanes");
            check("high-demand-lanes", lanes, MAX_LISTED_LANES..=MAX_LISTED_LANES, "top lanes");

            check("dispatcher-insights", cards(page, "dispatcher-insights"), INSIGHT_COUNT, "insights");
            check("faq", count(page, "faq"), FAQ_COUNT, "FAQ entries");
        }
        PageKind::Lane => {
            check("dispatcher-tips", cards(page, "dispatcher-tips"), TIP_COUNT, "tips");
        }
        PageKind::TruckType | PageKind::Partner | PageKind::Index => {}
    }

    for issue in &issues {
        warn!(path = %issue.path, section = issue.section, "{}", issue.message);
    }
    issues
}

/// Audit every page; in strict mode any finding becomes an error.
pub fn audit_all(pages: &[ComposedPage], strict: bool) -> Result<Vec<ContentIssue>> {
    let issues: Vec<ContentIssue> = pages.iter().flat_map(audit).collect();
    if strict && !issues.is_empty() {
        return Err(DispatchPagesError::validation(format!(
            "content audit found {} issue(s); first: {}",
            issues.len(),
            issues[0]
        )));
    }
    Ok(issues)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn first_paragraph(block: &Block) -> Option<&str> {
    block.parts.iter().find_map(|part| match part {
        Part::Paragraph { text } => Some(text.as_str()),
        _ => None,
    })
}

fn count(page: &ComposedPage, id: &str) -> usize {
    page.block(id).map(Block::item_count).unwrap_or(0)
}

fn cards(page: &ComposedPage, id: &str) -> usize {
    page.block(id)
        .map(|block| {
            block
                .parts
                .iter()
                .map(|part| match part {
                    Part::Cards { cards } => cards.len(),
                    _ => 0,
                })
                .sum()
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use dispatchpages_registry::Catalog;
    use dispatchpages_shared::SiteConfig;

    use super::*;
    use crate::page::compose_page;
    use crate::routes::PageRef;
    use crate::schema::JsonLdServiceSchema;

    fn compose(page: PageRef) -> ComposedPage {
        let site = SiteConfig::default();
        compose_page(&Catalog::builtin(), &page, &site, &JsonLdServiceSchema::from_site(&site)).unwrap()
    }

    #[test]
    fn state_page_reports_short_intro_and_lane_count() {
        let page = compose(PageRef::State {
            state: "ohio".into(),
        });
        let issues = audit(&page);
        let sections: Vec<&str> = issues.iter().map(|i| i.section).collect();

        assert!(sections.contains(&"overview"));
        assert!(sections.contains(&"high-demand-lanes"));
        assert!(!sections.contains(&"dispatcher-insights"));
        assert!(!sections.contains(&"faq"));

        let lanes = issues.iter().find(|i| i.section == "high-demand-lanes").unwrap();
        assert_eq!(lanes.message, "expected exactly 15 top lanes, found 0");
    }

    #[test]
    fn lane_with_empty_authored_tips_is_flagged() {
        let page = compose(PageRef::Lane {
            state: "california".into(),
            lane: "fresno-to-portland".into(),
        });
        let issues = audit(&page);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "expected 2 to 5 tips, found 0");

        let page = compose(PageRef::Lane {
            state: "texas".into(),
            lane: "laredo-to-memphis".into(),
        });
        assert!(audit(&page).is_empty());
    }

    #[test]
    fn strict_mode_turns_findings_into_errors() {
        let page = compose(PageRef::Lane {
            state: "california".into(),
            lane: "fresno-to-portland".into(),
        });
        let pages = vec![page];
        assert_eq!(audit_all(&pages, false).unwrap().len(), 1);

        let err = audit_all(&pages, true).unwrap_err();
        assert!(err.to_string().contains("content audit found 1 issue(s)"));
    }

    #[test]
    fn partners_have_no_rules() {
        let page = compose(PageRef::Partner { slug: "rxo".into() });
        assert!(audit(&page).is_empty());
    }
}
