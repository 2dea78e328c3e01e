use std::collections::{BTreeMap, BTreeSet};

use crate::types::ResourceKind;

/// Identifiers of every object a test class created, grouped by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedResources {
    ids: BTreeMap<ResourceKind, BTreeSet<String>>,
}

impl Default for CreatedResources {
    fn default() -> Self {
        Self::new()
    }
}

impl CreatedResources {
    /// One empty set per tracked kind.
    pub fn new() -> Self {
        Self {
            ids: ResourceKind::ALL
                .into_iter()
                .map(|kind| (kind, BTreeSet::new()))
                .collect(),
        }
    }

    /// Returns false when the id was already tracked.
    pub fn register(&mut self, kind: ResourceKind, id: impl Into<String>) -> bool {
        self.ids.entry(kind).or_default().insert(id.into())
    }

    pub fn forget(&mut self, kind: ResourceKind, id: &str) -> bool {
        self.ids.get_mut(&kind).is_some_and(|ids| ids.remove(id))
    }

    pub fn contains(&self, kind: ResourceKind, id: &str) -> bool {
        self.ids.get(&kind).is_some_and(|ids| ids.contains(id))
    }

    pub fn ids(&self, kind: ResourceKind) -> impl Iterator<Item = &str> {
        self.ids.get(&kind).into_iter().flatten().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties every set, handing back the ids in teardown order.
    pub fn drain(&mut self) -> Vec<(ResourceKind, Vec<String>)> {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| {
                let ids = self
                    .ids
                    .get_mut(&kind)
                    .map(std::mem::take)
                    .unwrap_or_default();
                (kind, ids.into_iter().collect())
            })
            .collect()
    }
}
