//! Traits describing read-only battle data.
//!
//! Oracles expose the ability catalog and the deterministic random source.
//! The [`BattleEnv`] aggregate bundles them so the session can reach both
//! without hard coupling to concrete implementations.

mod catalog;
mod rng;

pub use catalog::{AbilityCatalog, StaticCatalog};
pub use rng::{
    DRAW_GAMBLE_PICK, DRAW_GAMBLE_ROLL, DRAW_JITTER_BASE, DRAW_TARGET_BASE, PcgRng, RngOracle,
    compute_seed,
};

/// Aggregates the read-only oracles required to resolve battle actions.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    catalog: &'a dyn AbilityCatalog,
    rng: &'a dyn RngOracle,
}

impl<'a> BattleEnv<'a> {
    pub fn new(catalog: &'a dyn AbilityCatalog, rng: &'a dyn RngOracle) -> Self {
        Self { catalog, rng }
    }

    /// Returns the ability catalog.
    pub fn catalog(&self) -> &'a dyn AbilityCatalog {
        self.catalog
    }

    /// Returns the deterministic random source.
    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}
