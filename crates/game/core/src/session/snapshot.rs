//! Read-only views of a running battle.
//!
//! Presentation layers render from these snapshots and never touch the
//! mutable state directly. Every field is an owned copy, so a snapshot
//! stays valid after the battle moves on.

use super::{Outcome, SessionPhase};
use crate::ability::AbilityId;
use crate::state::{Controller, ResourceMeter, Round, Side, Unit, UnitId};

/// Point-in-time copy of one unit for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitView {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub controller: Controller,
    /// Summoner of this unit, when it was summoned mid-battle.
    pub owner: Option<UnitId>,
    pub hp: ResourceMeter,
    pub energy: ResourceMeter,
    /// Attack after persistent modifiers.
    pub attack: u32,
    /// Defense after persistent modifiers.
    pub defense: u32,
    pub speed: u32,
    pub abilities: Vec<AbilityId>,
}

impl UnitView {
    pub(crate) fn of(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            side: unit.side,
            controller: unit.controller,
            owner: unit.owner,
            hp: unit.hp,
            energy: unit.energy,
            attack: unit.effective_atk(),
            defense: unit.effective_def(),
            speed: unit.spd,
            abilities: unit.abilities.to_vec(),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }
}

/// Full battle view: both rosters, the round, the phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub round: Round,
    pub phase: SessionPhase,
    /// Every unit in spawn order, fallen ones included.
    pub units: Vec<UnitView>,
}

impl BattleSnapshot {
    /// Looks up one unit's view by id.
    pub fn unit(&self, id: UnitId) -> Option<&UnitView> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Views of the living units on one side, in spawn order.
    pub fn living_on(&self, side: Side) -> impl Iterator<Item = &UnitView> {
        self.units
            .iter()
            .filter(move |unit| unit.side == side && unit.is_alive())
    }

    /// The unit whose action the session is waiting for, if any.
    pub fn awaiting(&self) -> Option<UnitId> {
        match self.phase {
            SessionPhase::AwaitingPlayer(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            SessionPhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::Resolved(_))
    }
}
