//! Ability catalog oracle.
//!
//! Provides access to ability descriptors by id. Descriptors are immutable
//! content: the catalog hands out owned copies, so a resolved action can
//! never observe a descriptor changing under it.

use std::collections::BTreeMap;

use crate::ability::{Ability, AbilityId};

/// Oracle providing ability descriptors.
///
/// Descriptors define the complete behavior of an ability: effect kind,
/// multiplier, energy cost and gain, and targeting rule. They are loaded
/// from RON data files by content crates.
pub trait AbilityCatalog: Send + Sync {
    /// Returns an owned copy of the descriptor for the given id.
    fn ability(&self, id: &AbilityId) -> Option<Ability>;

    /// Returns whether the catalog defines the given id.
    fn contains(&self, id: &AbilityId) -> bool {
        self.ability(id).is_some()
    }
}

/// In-memory catalog backed by a sorted map.
///
/// Iteration order is the id's lexical order, which keeps anything derived
/// from a full catalog walk deterministic.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    abilities: BTreeMap<AbilityId, Ability>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor, replacing any previous one with the same id.
    pub fn insert(&mut self, ability: Ability) -> Option<Ability> {
        self.abilities.insert(ability.id.clone(), ability)
    }

    /// Returns the number of descriptors in the catalog.
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Iterates descriptors in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.values()
    }
}

impl AbilityCatalog for StaticCatalog {
    fn ability(&self, id: &AbilityId) -> Option<Ability> {
        self.abilities.get(id).cloned()
    }

    fn contains(&self, id: &AbilityId) -> bool {
        self.abilities.contains_key(id)
    }
}

impl FromIterator<Ability> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = Ability>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for ability in iter {
            catalog.insert(ability);
        }
        catalog
    }
}
