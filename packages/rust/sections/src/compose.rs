//! The section contract and the page fold.

use serde::Serialize;

use crate::block::Block;

/// A section: a pure function of one entity that renders or yields nothing.
pub type Section<E> = fn(&E) -> Option<Block>;

/// A section paired with its stable id.
pub struct SectionDef<E> {
    pub id: &'static str,
    pub render: Section<E>,
}

impl<E> SectionDef<E> {
    pub const fn new(id: &'static str, render: Section<E>) -> Self {
        Self { id, render }
    }
}

impl<E> Clone for SectionDef<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for SectionDef<E> {}

impl<E> std::fmt::Debug for SectionDef<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SectionDef").field(&self.id).finish()
    }
}

/// The blocks of one page plus the ids of sections that rendered nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Composition {
    pub blocks: Vec<Block>,
    pub skipped: Vec<&'static str>,
}

impl Composition {
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.blocks.iter().map(|b| b.id).collect()
    }
}

/// Run every section in order, collecting rendered blocks.
///
/// Each section sees only the entity, so the output of one never depends on
/// another. An empty section is recorded in `skipped`, never treated as an error.
pub fn compose<E>(entity: &E, sections: &[SectionDef<E>]) -> Composition {
    sections
        .iter()
        .fold(Composition::default(), |mut page, def| {
            match (def.render)(entity) {
                Some(mut block) => {
                    block.id = def.id;
                    page.blocks.push(block);
                }
                None => {
                    tracing::debug!(section = def.id, "section empty, skipped");
                    page.skipped.push(def.id);
                }
            }
            page
        })
}

/// Ties an entity type to its ordered section list.
pub trait PageSections: Sized + 'static {
    const SECTIONS: &'static [SectionDef<Self>];

    fn compose(&self) -> Composition {
        compose(self, Self::SECTIONS)
    }
}

/// Asserts that `cleared` lost exactly section `id` compared to `full`.
///
/// Every other block must be unchanged, except those listed in `also_reads`
/// which read the cleared fields as a fallback source.
#[cfg(test)]
pub(crate) fn assert_only_skipped(
    full: &Composition,
    cleared: &Composition,
    id: &str,
    also_reads: &[&str],
) {
    assert!(full.block(id).is_some(), "{id} should render on the full entity");
    assert!(cleared.block(id).is_none(), "{id} should render nothing once cleared");

    let newly_skipped: Vec<&str> = cleared
        .skipped
        .iter()
        .copied()
        .filter(|s| !full.skipped.contains(s))
        .collect();
    assert_eq!(newly_skipped, vec![id]);

    for block in full.blocks.iter().filter(|b| b.id != id) {
        let after = cleared.block(block.id);
        assert!(after.is_some(), "{} disappeared when {id} was cleared", block.id);
        if !also_reads.contains(&block.id) {
            assert_eq!(after, Some(block), "{} changed when {id} was cleared", block.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doc {
        title: &'static str,
        tags: Vec<&'static str>,
    }

    fn title(doc: &Doc) -> Option<Block> {
        Some(Block::new("title", doc.title))
    }

    fn tags(doc: &Doc) -> Option<Block> {
        if doc.tags.is_empty() {
            return None;
        }
        Some(Block::new("tags", "Tags").list(None, doc.tags.iter().copied()))
    }

    const SECTIONS: &[SectionDef<Doc>] = &[
        SectionDef::new("title", title),
        SectionDef::new("tags", tags),
        SectionDef::new("footer", footer),
    ];

    fn footer(_: &Doc) -> Option<Block> {
        Some(Block::new("", "Footer"))
    }

    #[test]
    fn fold_keeps_order_and_records_skips() {
        let doc = Doc {
            title: "Hello",
            tags: vec![],
        };
        let page = compose(&doc, SECTIONS);
        assert_eq!(page.ids(), vec!["title", "footer"]);
        assert_eq!(page.skipped, vec!["tags"]);
    }

    #[test]
    fn block_ids_come_from_definitions() {
        let doc = Doc {
            title: "Hello",
            tags: vec!["a"],
        };
        let page = compose(&doc, SECTIONS);
        assert_eq!(page.ids(), vec!["title", "tags", "footer"]);
        assert!(page.block("footer").is_some());
        assert!(page.skipped.is_empty());
    }
}
