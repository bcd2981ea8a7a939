//! Lanes indexed by `(state, lane)`.

use dispatchpages_shared::{LaneEntity, Result, StateEntity, lane_key};

use crate::registry::Registry;

/// Every lane of every state, keyed `"{state}:{lane}"`.
///
/// Lanes are collected in state order, then in each state's authored order.
#[derive(Debug, Clone)]
pub struct LaneRegistry {
    inner: Registry<LaneEntity>,
}

impl LaneRegistry {
    /// Collect the nested lanes of `states`.
    pub fn from_states<'a>(states: impl IntoIterator<Item = &'a StateEntity>) -> Result<Self> {
        let lanes: Vec<LaneEntity> = states
            .into_iter()
            .flat_map(|state| {
                state.lanes.iter().cloned().map(move |mut lane| {
                    lane.state_slug.clone_from(&state.slug);
                    lane
                })
            })
            .collect();

        Ok(Self {
            inner: Registry::build(lanes)?,
        })
    }

    pub fn get(&self, state_slug: &str, lane_slug: &str) -> Option<&LaneEntity> {
        self.inner.get_by_slug(&lane_key(state_slug, lane_slug))
    }

    pub fn get_all(&self) -> &[LaneEntity] {
        self.inner.get_all()
    }

    /// Lanes of one state, in authored order.
    pub fn for_state(&self, state_slug: &str) -> Vec<&LaneEntity> {
        self.inner
            .get_all()
            .iter()
            .filter(|lane| lane.state_slug == state_slug)
            .collect()
    }

    pub fn exists(&self, state_slug: &str, lane_slug: &str) -> bool {
        self.inner.exists(&lane_key(state_slug, lane_slug))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
