//! Runtime unit representation and the static definitions units spawn from.
//!
//! `UnitDef` is the data-driven shape shared by roster characters and stage
//! enemies; it can be deserialized straight from RON files. The session
//! instantiates a [`Unit`] per definition at battle start and owns it for
//! the rest of the encounter.

use arrayvec::ArrayVec;

use crate::ability::AbilityId;
use crate::config::BattleConfig;
use crate::state::{Controller, ResourceMeter, Side, UnitId};

/// Additive stat modifiers accumulated over the encounter.
///
/// Buff effects add here; nothing removes entries until the session ends,
/// so the fields are signed to leave room for debuffs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifiers {
    /// Cumulative attack adjustment.
    pub atk: i64,
    /// Cumulative defense adjustment.
    pub def: i64,
}

/// A combatant owned by the battle session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub controller: Controller,

    /// Backlink to the summoning unit, when this unit is a summon.
    ///
    /// No summon spawns in the current rules; the field is the seam future
    /// summon mechanics plug into without reshaping the store.
    pub owner: Option<UnitId>,

    pub hp: ResourceMeter,
    pub energy: ResourceMeter,

    pub atk: u32,
    pub def: u32,
    pub spd: u32,

    /// Encounter-scoped additive modifiers.
    pub mods: StatModifiers,

    /// Ordered ability ids; fixed after creation.
    pub abilities: ArrayVec<AbilityId, { BattleConfig::MAX_ABILITIES_PER_UNIT }>,
}

impl Unit {
    /// Quick check that this unit can still act and be targeted.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp.current > 0
    }

    /// True when this unit was spawned by another unit.
    #[inline]
    pub fn is_summon(&self) -> bool {
        self.owner.is_some()
    }

    /// Attack with accumulated modifiers folded in, floored at zero.
    pub fn effective_atk(&self) -> u32 {
        (i64::from(self.atk) + self.mods.atk).clamp(0, i64::from(u32::MAX)) as u32
    }

    /// Defense with accumulated modifiers folded in, floored at zero.
    pub fn effective_def(&self) -> u32 {
        (i64::from(self.def) + self.mods.def).clamp(0, i64::from(u32::MAX)) as u32
    }

    /// Current hp as a fraction of maximum.
    #[inline]
    pub fn hp_fraction(&self) -> f64 {
        self.hp.fraction()
    }

    /// True when hp sits below maximum.
    #[inline]
    pub fn is_injured(&self) -> bool {
        self.hp.current < self.hp.maximum
    }

    /// Whether this unit's ability set contains the given id.
    pub fn knows(&self, ability: &AbilityId) -> bool {
        self.abilities.iter().any(|known| known == ability)
    }
}

/// Static definition a unit is instantiated from.
///
/// Roster characters (with stats already resolved by the collection
/// subsystem) and stage enemies share this shape.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitDef {
    pub name: String,
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
    /// Energy ceiling for this unit.
    pub max_energy: u32,
    /// Energy the unit enters battle with.
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy: u32,
    pub abilities: ArrayVec<AbilityId, { BattleConfig::MAX_ABILITIES_PER_UNIT }>,
}

impl UnitDef {
    /// Create a builder for constructing unit definitions.
    pub fn builder(name: impl Into<String>) -> UnitDefBuilder {
        UnitDefBuilder::new(name)
    }

    /// Instantiate a combat unit from this definition.
    ///
    /// Hp starts at maximum; energy starts at the definition's opening
    /// value, clamped to its ceiling.
    pub fn to_unit(&self, id: UnitId, side: Side, controller: Controller) -> Unit {
        Unit {
            id,
            name: self.name.clone(),
            side,
            controller,
            owner: None,
            hp: ResourceMeter::at_max(self.max_hp),
            energy: ResourceMeter::new(self.energy, self.max_energy),
            atk: self.atk,
            def: self.def,
            spd: self.spd,
            mods: StatModifiers::default(),
            abilities: self.abilities.clone(),
        }
    }
}

/// Builder for constructing unit definitions.
pub struct UnitDefBuilder {
    name: String,
    max_hp: u32,
    atk: u32,
    def: u32,
    spd: u32,
    max_energy: u32,
    energy: u32,
    abilities: ArrayVec<AbilityId, { BattleConfig::MAX_ABILITIES_PER_UNIT }>,
}

impl UnitDefBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_hp: 100,
            atk: 10,
            def: 0,
            spd: 10,
            max_energy: 100,
            energy: 0,
            abilities: ArrayVec::new(),
        }
    }

    /// Set hp, attack, defense, and speed in one call.
    pub fn stats(mut self, max_hp: u32, atk: u32, def: u32, spd: u32) -> Self {
        self.max_hp = max_hp;
        self.atk = atk;
        self.def = def;
        self.spd = spd;
        self
    }

    /// Set the energy ceiling and opening value.
    pub fn energy(mut self, current: u32, maximum: u32) -> Self {
        self.energy = current;
        self.max_energy = maximum;
        self
    }

    /// Append an ability id. Ids beyond the per-unit cap are ignored.
    pub fn ability(mut self, id: impl Into<AbilityId>) -> Self {
        let _ = self.abilities.try_push(id.into());
        self
    }

    /// Build the unit definition.
    pub fn build(self) -> UnitDef {
        UnitDef {
            name: self.name,
            max_hp: self.max_hp,
            atk: self.atk,
            def: self.def,
            spd: self.spd,
            max_energy: self.max_energy,
            energy: self.energy,
            abilities: self.abilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_spawns_full_hp_unit() {
        let def = UnitDef::builder("Mira")
            .stats(120, 35, 12, 18)
            .energy(40, 100)
            .ability("strike")
            .ability("mend")
            .build();

        let unit = def.to_unit(UnitId(0), Side::Ally, Controller::Human);
        assert_eq!(unit.hp, ResourceMeter::at_max(120));
        assert_eq!(unit.energy, ResourceMeter::new(40, 100));
        assert!(unit.is_alive());
        assert!(!unit.is_injured());
        assert!(!unit.is_summon());
        assert!(unit.knows(&AbilityId::from("mend")));
        assert!(!unit.knows(&AbilityId::from("meteor")));
    }

    #[test]
    fn effective_stats_fold_modifiers_and_floor_at_zero() {
        let def = UnitDef::builder("Rook").stats(100, 50, 20, 10).build();
        let mut unit = def.to_unit(UnitId(1), Side::Enemy, Controller::Policy);

        unit.mods.atk += 30;
        assert_eq!(unit.effective_atk(), 80);

        unit.mods.atk = -200;
        assert_eq!(unit.effective_atk(), 0);

        unit.mods.def = -5;
        assert_eq!(unit.effective_def(), 15);
    }

    #[test]
    fn opening_energy_clamps_to_ceiling() {
        let def = UnitDef::builder("Spark").energy(250, 100).build();
        let unit = def.to_unit(UnitId(2), Side::Ally, Controller::Human);
        assert_eq!(unit.energy.current, 100);
    }
}
