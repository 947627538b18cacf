//! Character template loader.
//!
//! Loads the obtainable character pool from RON data files. Gacha pulls
//! reference these templates by id; the acquisition flow itself lives
//! outside the engine.

use std::path::Path;

use battle_core::UnitDef;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Collection tier of a character template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// One obtainable character: battle stats plus collection metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterTemplate {
    pub id: String,
    pub rarity: Rarity,
    /// Definition instantiated when this character joins a roster.
    pub def: UnitDef,
}

/// Registry of character templates, looked up by id.
#[derive(Clone, Debug)]
pub struct CharacterRegistry {
    templates: Vec<CharacterTemplate>,
}

impl CharacterRegistry {
    /// Loads the built-in character pool from embedded RON data.
    pub fn load() -> LoadResult<Self> {
        let raw = include_str!("../../data/characters.ron");
        let templates: Vec<CharacterTemplate> = ron::from_str(raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse characters.ron: {}", e))?;
        Ok(Self { templates })
    }

    /// Loads a character pool from a RON file.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        let templates: Vec<CharacterTemplate> = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse character RON {}: {}", path.display(), e)
        })?;
        Ok(Self { templates })
    }

    /// Gets a template by id.
    pub fn get(&self, id: &str) -> Option<&CharacterTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Assembles roster definitions from template ids, in order.
    ///
    /// Fails on the first id with no template rather than silently
    /// shrinking the roster.
    pub fn roster(&self, ids: &[&str]) -> LoadResult<Vec<UnitDef>> {
        ids.iter()
            .map(|id| {
                self.get(id)
                    .map(|template| template.def.clone())
                    .ok_or_else(|| anyhow::anyhow!("Unknown character template '{}'", id))
            })
            .collect()
    }

    /// Iterates every template in file order.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterTemplate> {
        self.templates.iter()
    }

    /// Returns the number of templates in the pool.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
