//! Content loaders for reading battle data from files.
//!
//! This module provides loaders that convert RON/TOML files into the
//! catalogs battle-core consumes. The embedded `data/` files ship the
//! built-in content; `from_path` variants exist for modded and test data.

pub mod abilities;
pub mod characters;
pub mod stages;
pub mod tuning;

pub use abilities::AbilityRegistry;
pub use characters::{CharacterRegistry, CharacterTemplate, Rarity};
pub use stages::StageRegistry;
pub use tuning::load_tuning;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
