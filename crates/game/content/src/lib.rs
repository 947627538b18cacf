//! Data-driven battle content and loaders.
//!
//! This crate houses the built-in game data and provides loaders for RON/TOML data files:
//! - Ability catalog (data-driven via RON)
//! - Character template pool (data-driven via RON)
//! - Stage catalog (data-driven via RON)
//! - Battle tuning overrides (data-driven via TOML)
//!
//! Content is consumed through battle-core's catalog oracle and never
//! appears in battle state.
//!
//! All loaders use battle-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityRegistry, CharacterRegistry, CharacterTemplate, Rarity, StageRegistry, load_tuning,
};
