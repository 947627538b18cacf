//! Stage catalog loader.

use std::path::Path;

use battle_core::StageDef;

use crate::loaders::{LoadResult, read_file};

/// Registry of battle stages, looked up by id.
#[derive(Clone, Debug)]
pub struct StageRegistry {
    stages: Vec<StageDef>,
}

impl StageRegistry {
    /// Loads the built-in stage catalog from embedded RON data.
    pub fn load() -> LoadResult<Self> {
        let raw = include_str!("../../data/stages.ron");
        let stages: Vec<StageDef> = ron::from_str(raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse stages.ron: {}", e))?;
        Ok(Self { stages })
    }

    /// Loads a stage catalog from a RON file.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        let stages: Vec<StageDef> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stage RON {}: {}", path.display(), e))?;
        Ok(Self { stages })
    }

    /// Gets a stage by id.
    pub fn get(&self, id: &str) -> Option<&StageDef> {
        self.stages.iter().find(|stage| stage.id == id)
    }

    /// Iterates every stage in file order.
    pub fn iter(&self) -> impl Iterator<Item = &StageDef> {
        self.stages.iter()
    }

    /// Returns the number of stages in the catalog.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_stages_load() {
        let registry = StageRegistry::load().expect("Failed to load stage catalog");
        assert!(registry.len() >= 3, "catalog looks truncated");

        let opener = registry.get("verdant-1").expect("verdant-1 missing");
        assert_eq!(opener.name, "Verdant Hollow");
        assert!(!opener.enemies.is_empty());
        assert!(opener.reward.gold > 0);
    }

    #[test]
    fn every_stage_has_a_nonempty_lineup() {
        let registry = StageRegistry::load().unwrap();
        for stage in registry.iter() {
            assert!(!stage.enemies.is_empty(), "stage '{}' has no enemies", stage.id);
            for enemy in &stage.enemies {
                assert!(!enemy.abilities.is_empty(), "enemy '{}' has no abilities", enemy.name);
            }
        }
    }
}
