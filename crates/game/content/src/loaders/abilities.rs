//! Ability catalog loader.
//!
//! Loads ability descriptors from RON data files and builds the catalog
//! the engine resolves ids against.

use std::path::Path;

use battle_core::{Ability, AbilityCatalog, AbilityId, StaticCatalog};

use crate::loaders::{LoadResult, read_file};

/// Registry for ability descriptors.
///
/// Backed by a [`StaticCatalog`]; sessions and the opponent policy consult
/// it through battle-core's catalog oracle.
#[derive(Debug, Clone, Default)]
pub struct AbilityRegistry {
    catalog: StaticCatalog,
}

impl AbilityRegistry {
    /// Loads the built-in ability catalog from embedded RON data.
    pub fn load() -> LoadResult<Self> {
        let raw = include_str!("../../data/abilities.ron");
        let descriptors: Vec<Ability> = ron::from_str(raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse abilities.ron: {}", e))?;
        Ok(Self::from_descriptors(descriptors))
    }

    /// Loads an ability catalog from a RON file.
    ///
    /// Used for modded and test data; the format matches `data/abilities.ron`.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        let descriptors: Vec<Ability> = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse ability RON {}: {}", path.display(), e)
        })?;
        Ok(Self::from_descriptors(descriptors))
    }

    fn from_descriptors(descriptors: Vec<Ability>) -> Self {
        Self {
            catalog: descriptors.into_iter().collect(),
        }
    }

    /// Gets a descriptor copy by id.
    pub fn get(&self, id: &AbilityId) -> Option<Ability> {
        self.catalog.ability(id)
    }

    /// Whether the id is registered.
    pub fn contains(&self, id: &AbilityId) -> bool {
        self.catalog.contains(id)
    }

    /// The catalog the engine resolves against.
    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    /// Consumes the registry, yielding the bare catalog.
    pub fn into_catalog(self) -> StaticCatalog {
        self.catalog
    }

    /// Returns the number of registered descriptors.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Returns true if no descriptors are registered.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_catalog_loads() {
        let registry = AbilityRegistry::load().expect("Failed to load ability catalog");
        assert!(registry.len() >= 8, "catalog looks truncated");

        let strike = registry.get(&"strike".into()).expect("strike missing");
        assert!(strike.is_basic());
        assert!(strike.is_damage());

        let chorus = registry.get(&"radiant_chorus".into()).expect("chorus missing");
        assert!(chorus.is_group_heal());
    }

    #[test]
    fn file_backed_catalog_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[(
                id: "test_jab",
                name: "Test Jab",
                kind: Damage,
                multiplier: 1.0,
                cost: 0,
                gain: 0,
                targeting: SingleEnemy,
                tags: [Basic],
            )]"#
        )
        .unwrap();

        let registry = AbilityRegistry::from_path(file.path()).expect("Failed to load RON");
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&"test_jab".into()));
    }

    #[test]
    fn malformed_ron_is_reported_with_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not ron at all").unwrap();

        let err = AbilityRegistry::from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse ability RON"));
    }
}
