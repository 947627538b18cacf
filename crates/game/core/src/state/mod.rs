//! Authoritative battle state representation.
//!
//! This module owns the unit store and the per-encounter bookkeeping (seed,
//! action nonce, round counter). Outer layers read this state freely but
//! mutate it exclusively through the session and the effect resolver.

pub mod digest;
pub mod types;
pub mod unit;

pub use bounded_vector::BoundedVec;
#[cfg(feature = "serde")]
pub use digest::state_digest;
pub use types::{Controller, ResourceMeter, Round, Side, UnitId};
pub use unit::{StatModifiers, Unit, UnitDef, UnitDefBuilder};

use crate::config::BattleConfig;

/// Canonical state for one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// RNG seed for deterministic random draws.
    ///
    /// Set once at session start and never modified. Combined with the
    /// action nonce to derive a unique seed for every random event.
    pub seed: u64,

    /// Action sequence number, incremented once per executed action.
    nonce: u64,

    /// Current round (1-based).
    pub round: Round,

    /// All units across both sides, allies first.
    pub units: UnitStore,
}

impl BattleState {
    /// Creates an empty battlefield with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            nonce: 0,
            round: Round::FIRST,
            units: UnitStore::default(),
        }
    }

    /// Current action nonce.
    #[inline]
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Advances the action nonce. Called once per executed action.
    pub(crate) fn advance_nonce(&mut self) {
        self.nonce += 1;
    }
}

/// Bounded container for every unit in the encounter.
///
/// Units are appended at spawn time and never removed; a fallen unit stays
/// in place with zero hp, which keeps [`UnitId`] a stable dense index and
/// preserves original roster order for stable sorting.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStore {
    units: BoundedVec<Unit, 0, { BattleConfig::MAX_UNITS }>,
}

impl UnitStore {
    /// Instantiates a definition and appends the unit.
    ///
    /// # Returns
    ///
    /// - `Ok(UnitId)` - the allocated id for the new unit
    /// - `Err` if the store is full
    pub fn spawn(
        &mut self,
        def: &UnitDef,
        side: Side,
        controller: Controller,
    ) -> Result<UnitId, &'static str> {
        let id = UnitId(self.units.len() as u32);
        let unit = def.to_unit(id, side, controller);
        self.units
            .push(unit)
            .map_err(|_| "Failed to spawn unit (store full)")?;
        Ok(id)
    }

    /// Returns a reference to a unit by id.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Returns a mutable reference to a unit by id.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    /// Iterates every unit in store order (allies first, then enemies).
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Iterates every living unit in store order.
    pub fn living(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.is_alive())
    }

    /// Iterates living units on one side, in store order.
    pub fn living_on(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.living().filter(move |unit| unit.side == side)
    }

    /// Ids of the living units on one side, in store order.
    pub fn living_ids_on(&self, side: Side) -> Vec<UnitId> {
        self.living_on(side).map(|unit| unit.id).collect()
    }

    /// Number of living units on one side.
    pub fn living_count_on(&self, side: Side) -> usize {
        self.living_on(side).count()
    }

    /// True when no unit on the given side is still standing.
    pub fn side_is_wiped(&self, side: Side) -> bool {
        self.living_count_on(side) == 0
    }

    /// Total number of units (living and fallen).
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when no units have been spawned.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
