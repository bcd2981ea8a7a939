//! The generic slug-keyed registry.

use std::collections::HashMap;

use dispatchpages_shared::{DispatchPagesError, Entity, Result};

/// An immutable, ordered collection of entities indexed by registry key.
///
/// Built once from a factory list. Lookups never fail loudly: absence is
/// `None`, and only [`Registry::require`] turns it into a `NotFound` error
/// for route-facing callers.
#[derive(Debug, Clone)]
pub struct Registry<E> {
    entries: Vec<E>,
    index: HashMap<String, usize>,
}

impl<E: Entity> Registry<E> {
    /// Index `entities` by key, preserving factory order.
    ///
    /// Fails with a `Configuration` error naming the first slug that is not
    /// URL-safe, or the first duplicated key.
    pub fn build(entities: Vec<E>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entities.len());

        for (position, entity) in entities.iter().enumerate() {
            let slug = entity.slug();
            if !is_url_slug(slug) {
                return Err(DispatchPagesError::configuration(
                    E::CATEGORY,
                    format!("slug '{slug}' must be non-empty lowercase a-z, 0-9 and '-'"),
                ));
            }
            let key = entity.registry_key().into_owned();
            if index.contains_key(&key) {
                return Err(DispatchPagesError::duplicate_slug(E::CATEGORY, &key));
            }
            index.insert(key, position);
        }

        tracing::debug!(category = E::CATEGORY, count = entities.len(), "registry built");

        Ok(Self {
            entries: entities,
            index,
        })
    }

    /// Look up an entity by key.
    pub fn get_by_slug(&self, slug: &str) -> Option<&E> {
        self.index.get(slug).map(|&i| &self.entries[i])
    }

    /// All entities in factory order.
    pub fn get_all(&self) -> &[E] {
        &self.entries
    }

    pub fn exists(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    /// Entity slugs in factory order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entity::slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entity, mapping absence to `NotFound`.
    pub fn require(&self, slug: &str) -> Result<&E> {
        self.get_by_slug(slug)
            .ok_or_else(|| DispatchPagesError::not_found(E::CATEGORY, slug))
    }
}

/// Non-empty and made only of `[a-z0-9-]`.
pub fn is_url_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        slug: &'static str,
        group: &'static str,
    }

    impl Entity for Item {
        const CATEGORY: &'static str = "item";

        fn slug(&self) -> &str {
            self.slug
        }

        fn display_name(&self) -> &str {
            self.slug
        }
    }

    #[derive(Debug, Clone)]
    struct Grouped(Item);

    impl Entity for Grouped {
        const CATEGORY: &'static str = "grouped";

        fn slug(&self) -> &str {
            self.0.slug
        }

        fn display_name(&self) -> &str {
            self.0.slug
        }

        fn registry_key(&self) -> Cow<'_, str> {
            Cow::Owned(format!("{}:{}", self.0.group, self.0.slug))
        }
    }

    fn item(slug: &'static str) -> Item {
        Item { slug, group: "a" }
    }

    #[test]
    fn preserves_factory_order() {
        let registry = Registry::build(vec![item("c"), item("a"), item("b")]).unwrap();
        let slugs: Vec<&str> = registry.slugs().collect();
        assert_eq!(slugs, vec!["c", "a", "b"]);
        assert_eq!(registry.get_all()[0].slug, "c");
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn lookup_is_total() {
        let registry = Registry::build(vec![item("a"), item("b")]).unwrap();
        assert_eq!(registry.get_by_slug("a"), Some(&item("a")));
        assert_eq!(registry.get_by_slug("zzz"), None);
        assert_eq!(registry.get_by_slug(""), None);
        assert!(registry.exists("b"));
        assert!(!registry.exists("B"));
    }

    #[test]
    fn duplicate_slug_is_a_configuration_error() {
        let err = Registry::build(vec![item("a"), item("b"), item("a")]).unwrap_err();
        match err {
            DispatchPagesError::Configuration { category, message } => {
                assert_eq!(category, "item");
                assert!(message.contains("'a'"));
            }
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn require_maps_absence_to_not_found() {
        let registry = Registry::build(vec![item("a")]).unwrap();
        assert!(registry.require("a").is_ok());
        let err = registry.require("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_registry() {
        let registry: Registry<Item> = Registry::build(vec![]).unwrap();
        assert!(registry.is_empty());
        assert!(registry.get_all().is_empty());
        assert!(!registry.exists("a"));
    }

    #[test]
    fn composite_keys_allow_repeated_slugs_across_groups() {
        let a = Grouped(Item { slug: "x", group: "one" });
        let b = Grouped(Item { slug: "x", group: "two" });
        let registry = Registry::build(vec![a, b]).unwrap();
        assert!(registry.exists("one:x"));
        assert!(registry.exists("two:x"));
        assert!(!registry.exists("x"));

        let dup = Grouped(Item { slug: "x", group: "one" });
        let err = Registry::build(vec![dup.clone(), dup]).unwrap_err();
        assert!(err.to_string().contains("'one:x'"));
    }

    #[test]
    fn slugs_must_be_url_safe() {
        for bad in ["", "new/york", "../../../escaped", "Texas", "new york", "a:b"] {
            let err = Registry::build(vec![item("ok"), item(bad)]).unwrap_err();
            match err {
                DispatchPagesError::Configuration { category, message } => {
                    assert_eq!(category, "item");
                    assert!(message.contains(&format!("'{bad}'")), "{message}");
                }
                other => panic!("expected Configuration for {bad:?}, got {other:?}"),
            }
        }
        assert!(Registry::build(vec![item("dry-van"), item("i-95")]).is_ok());
    }

    #[test]
    fn composite_keys_check_the_slug_not_the_key() {
        let bad = Grouped(Item { slug: "x/y", group: "one" });
        assert!(Registry::build(vec![bad]).is_err());
    }
}
