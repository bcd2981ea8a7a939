//! Renderer-agnostic content blocks.
//!
//! A [`Block`] is what one section produces: an optional eyebrow label, a
//! heading, and an ordered list of [`Part`]s. Renderers in `dispatchpages-core`
//! turn blocks into HTML or Markdown.

use serde::Serialize;

/// The output of one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    /// Stable section id (e.g., `"hero"`).
    pub id: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    pub heading: String,
    pub parts: Vec<Part>,
}

/// One piece of block content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Part {
    Paragraph {
        text: String,
    },
    List {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        items: Vec<String>,
    },
    Cards {
        cards: Vec<Card>,
    },
    Facts {
        facts: Vec<Fact>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Links {
        links: Vec<Link>,
    },
    Image {
        src: String,
        alt: String,
    },
    Faq {
        entries: Vec<FaqEntry>,
    },
    Action {
        label: String,
        href: String,
    },
    /// Filled with the configured company phone at render time.
    ContactPhone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub title: String,
    pub body: String,
}

impl Card {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            number: None,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn numbered(number: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            ..Self::new(title, body)
        }
    }
}

/// A label/value pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

impl Fact {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub title: String,
    pub href: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl Block {
    pub fn new(id: &'static str, heading: impl Into<String>) -> Self {
        Self {
            id,
            eyebrow: None,
            heading: heading.into(),
            parts: Vec::new(),
        }
    }

    pub fn eyebrow(mut self, label: impl Into<String>) -> Self {
        self.eyebrow = Some(label.into());
        self
    }

    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Append `part` only when it is `Some`.
    pub fn part_opt(mut self, part: Option<Part>) -> Self {
        self.parts.extend(part);
        self
    }

    pub fn paragraph(self, text: impl Into<String>) -> Self {
        self.part(Part::Paragraph { text: text.into() })
    }

    pub fn list<I, S>(self, title: Option<&str>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.part(Part::List {
            title: title.map(str::to_owned),
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    pub fn cards(self, cards: Vec<Card>) -> Self {
        self.part(Part::Cards { cards })
    }

    pub fn facts(self, facts: Vec<Fact>) -> Self {
        self.part(Part::Facts { facts })
    }

    pub fn image(self, src: impl Into<String>, alt: impl Into<String>) -> Self {
        self.part(Part::Image {
            src: src.into(),
            alt: alt.into(),
        })
    }

    pub fn action(self, label: impl Into<String>, href: impl Into<String>) -> Self {
        self.part(Part::Action {
            label: label.into(),
            href: href.into(),
        })
    }

    /// Every list item, card, fact, link and FAQ entry in this block.
    pub fn item_count(&self) -> usize {
        self.parts
            .iter()
            .map(|part| match part {
                Part::List { items, .. } => items.len(),
                Part::Cards { cards } => cards.len(),
                Part::Facts { facts } => facts.len(),
                Part::Links { links } => links.len(),
                Part::Faq { entries } => entries.len(),
                Part::Table { rows, .. } => rows.len(),
                _ => 0,
            })
            .sum()
    }

    /// Plain text of every paragraph, joined by blank lines.
    pub fn paragraph_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Paragraph { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_part_order() {
        let block = Block::new("overview", "Overview")
            .eyebrow("ABOUT")
            .paragraph("first")
            .list(Some("Items"), ["a", "b"])
            .part_opt(None)
            .paragraph("second");

        assert_eq!(block.parts.len(), 3);
        assert_eq!(block.paragraph_text(), "first\n\nsecond");
        assert_eq!(block.item_count(), 2);
    }

    #[test]
    fn parts_serialize_with_type_tag() {
        let json = serde_json::to_value(Part::ContactPhone).unwrap();
        assert_eq!(json, serde_json::json!({"type": "contact-phone"}));

        let card = Card::numbered("01", "Why Choose", "Because");
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["number"], "01");
    }
}
