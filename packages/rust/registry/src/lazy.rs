//! Build-once registry initialization.

use std::sync::OnceLock;

use dispatchpages_shared::{DispatchPagesError, Entity, Result};

use crate::registry::Registry;

/// Factory producing the entity list for one category.
pub type Factory<E> = Box<dyn Fn() -> Result<Vec<E>> + Send + Sync>;

/// A registry that is built on first access and then frozen.
///
/// `initialize` runs the factory at most once, even under concurrent first
/// access. A failed build is remembered and reported again on every call.
pub struct LazyRegistry<E> {
    factory: Factory<E>,
    cell: OnceLock<std::result::Result<Registry<E>, String>>,
}

impl<E: Entity> LazyRegistry<E> {
    pub fn new(factory: impl Fn() -> Result<Vec<E>> + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            cell: OnceLock::new(),
        }
    }

    /// A lazy registry over a fixed entity list.
    pub fn from_entities(entities: Vec<E>) -> Self
    where
        E: Clone + Send + Sync + 'static,
    {
        Self::new(move || Ok(entities.clone()))
    }

    /// Build the registry if needed and return it.
    pub fn initialize(&self) -> Result<&Registry<E>> {
        let built = self.cell.get_or_init(|| {
            tracing::debug!(category = E::CATEGORY, "initializing registry");
            (self.factory)()
                .and_then(Registry::build)
                .map_err(configuration_message)
        });

        built
            .as_ref()
            .map_err(|message| DispatchPagesError::configuration(E::CATEGORY, message.clone()))
    }

    /// Whether the factory has already run (successfully or not).
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<E> std::fmt::Debug for LazyRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyRegistry")
            .field("initialized", &self.cell.get().is_some())
            .finish()
    }
}

/// Reduce a build failure to the message re-reported on later calls.
pub(crate) fn configuration_message(err: DispatchPagesError) -> String {
    match err {
        DispatchPagesError::Configuration { message, .. } => message,
        other => other.to_string(),
    }
}
