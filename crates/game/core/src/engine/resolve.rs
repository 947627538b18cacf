//! Ability resolution pipeline.
//!
//! The [`Resolver`] is the authoritative reducer for [`BattleState`]. Every
//! hp, energy, and modifier write in a battle flows through one call to
//! [`Resolver::resolve`], which runs three phases:
//!
//! 1. validate: reject bad input with the state untouched
//! 2. apply: deduct cost, grant gain, then resolve the effect per target
//! 3. audit: check resource invariants after the dust settles
//!
//! The apply phase appends one log entry per discrete target hit, plus a
//! cast entry when the ability moves energy and a defeat marker for every
//! unit it drops.

use crate::ability::{Ability, AbilityId, EffectKind, Targeting};
use crate::config::BattleConfig;
use crate::engine::error::{ActionError, InvariantError, ResolveError};
use crate::env::{BattleEnv, DRAW_TARGET_BASE, compute_seed};
use crate::log::{BattleLog, LogCategory};
use crate::state::{BattleState, Side, UnitId};

/// One ability use, as submitted by a human or chosen by the policy.
///
/// Carries the ability id, not the descriptor: the resolver looks the
/// descriptor up itself so validation cannot be bypassed with a forged copy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityUse {
    /// Unit performing the action.
    pub actor: UnitId,
    /// Ability to resolve.
    pub ability: AbilityId,
    /// Explicit target, required by single-target rules and ignored by the
    /// rest.
    pub target: Option<UnitId>,
}

impl AbilityUse {
    /// An untargeted use (self, group, or random targeting).
    pub fn new(actor: UnitId, ability: AbilityId) -> Self {
        Self {
            actor,
            ability,
            target: None,
        }
    }

    /// A use aimed at one explicit unit.
    pub fn targeted(actor: UnitId, ability: AbilityId, target: UnitId) -> Self {
        Self {
            actor,
            ability,
            target: Some(target),
        }
    }
}

/// Caster data captured before the volley starts.
///
/// Every target of one action sees the same caster numbers, even when the
/// action changes them mid-volley (a group buff that includes the caster).
struct CasterSnapshot {
    name: String,
    side: Side,
    effective_atk: u32,
}

/// Battle state reducer for a single ability use.
pub struct Resolver<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
    log: &'a mut BattleLog,
}

impl<'a> Resolver<'a> {
    pub fn new(
        state: &'a mut BattleState,
        config: &'a BattleConfig,
        log: &'a mut BattleLog,
    ) -> Self {
        Self { state, config, log }
    }

    /// Resolves one ability use against the battle state.
    ///
    /// On success the action nonce has advanced and the log carries every
    /// mutation the action made. On a validation error nothing changed.
    pub fn resolve(&mut self, env: &BattleEnv<'_>, action: &AbilityUse) -> Result<(), ResolveError> {
        let ability = self.validate(env, action)?;
        self.apply(env, action, &ability)?;
        self.audit()?;
        self.state.advance_nonce();
        Ok(())
    }

    /// Checks the action against the current state without mutating it.
    ///
    /// Energy is deliberately not checked here: an unaffordable cost is
    /// clamped at zero during apply rather than rejected.
    fn validate(&self, env: &BattleEnv<'_>, action: &AbilityUse) -> Result<Ability, ActionError> {
        let actor = self
            .state
            .units
            .unit(action.actor)
            .ok_or(ActionError::ActorNotFound(action.actor))?;
        if !actor.is_alive() {
            return Err(ActionError::ActorDown(action.actor));
        }
        if !actor.knows(&action.ability) {
            return Err(ActionError::AbilityNotKnown {
                unit: action.actor,
                ability: action.ability.clone(),
            });
        }

        let ability = env
            .catalog()
            .ability(&action.ability)
            .ok_or_else(|| ActionError::AbilityNotInCatalog(action.ability.clone()))?;

        if let Some(expected) = ability.targeting.explicit_target_side(actor.side) {
            let target_id = action
                .target
                .ok_or_else(|| ActionError::MissingTarget(action.ability.clone()))?;
            let target = self
                .state
                .units
                .unit(target_id)
                .ok_or(ActionError::TargetNotFound(target_id))?;
            if !target.is_alive() {
                return Err(ActionError::TargetDown(target_id));
            }
            if target.side != expected {
                return Err(ActionError::WrongSide {
                    unit: target_id,
                    expected,
                });
            }
        }

        Ok(ability)
    }

    /// Runs the energy bookkeeping and the per-target effects.
    fn apply(
        &mut self,
        env: &BattleEnv<'_>,
        action: &AbilityUse,
        ability: &Ability,
    ) -> Result<(), ActionError> {
        let round = self.state.round;
        let caster = {
            let unit = self
                .state
                .units
                .unit_mut(action.actor)
                .ok_or(ActionError::ActorNotFound(action.actor))?;

            // Cost first, clamped at zero, then gain, clamped at maximum.
            unit.energy.spend(ability.cost);
            unit.energy.gain(ability.gain);

            if ability.cost > 0 || ability.gain > 0 {
                let message = format!(
                    "{} channels {} (energy {})",
                    unit.name, ability.name, unit.energy
                );
                self.log.push(round, LogCategory::System, message);
            }

            CasterSnapshot {
                name: unit.name.clone(),
                side: unit.side,
                effective_atk: unit.effective_atk(),
            }
        };

        match ability.targeting {
            Targeting::SingleEnemy | Targeting::SingleAlly => {
                let target = action
                    .target
                    .ok_or_else(|| ActionError::MissingTarget(action.ability.clone()))?;
                self.apply_to(target, ability, &caster)?;
            }
            Targeting::SelfOnly => {
                self.apply_to(action.actor, ability, &caster)?;
            }
            Targeting::AllEnemies => {
                // Pre-volley snapshot: the living set is fixed when the
                // volley starts.
                for target in self.state.units.living_ids_on(caster.side.opponent()) {
                    self.apply_to(target, ability, &caster)?;
                }
            }
            Targeting::AllAllies => {
                for target in self.state.units.living_ids_on(caster.side) {
                    self.apply_to(target, ability, &caster)?;
                }
            }
            Targeting::RandomEnemies { draws } => {
                for draw in 0..draws {
                    // Each draw samples the units alive right now, so a kill
                    // on an earlier draw shrinks the pool.
                    let pool = self.state.units.living_ids_on(caster.side.opponent());
                    if pool.is_empty() {
                        break;
                    }
                    let seed = compute_seed(
                        self.state.seed,
                        self.state.nonce(),
                        action.actor.raw(),
                        DRAW_TARGET_BASE + draw,
                    );
                    let pick = env.rng().range(seed, 0, pool.len() as u32 - 1) as usize;
                    self.apply_to(pool[pick], ability, &caster)?;
                }
            }
        }

        Ok(())
    }

    /// Applies the ability's effect to one target and records it.
    fn apply_to(
        &mut self,
        target_id: UnitId,
        ability: &Ability,
        caster: &CasterSnapshot,
    ) -> Result<(), ActionError> {
        let round = self.state.round;
        let on_hit_gain = self.config.on_hit_energy_gain;
        let target = self
            .state
            .units
            .unit_mut(target_id)
            .ok_or(ActionError::TargetNotFound(target_id))?;

        match ability.kind {
            EffectKind::Damage => {
                let raw = caster.effective_atk as f64 * ability.multiplier
                    - target.effective_def() as f64 * 0.5;
                let damage = raw.floor().max(1.0) as u32;
                target.hp.spend(damage);

                // Taking a hit charges the defending roster's energy.
                let granted = if target.side.grants_on_hit_energy() {
                    target.energy.gain(on_hit_gain)
                } else {
                    0
                };

                let message = if granted > 0 {
                    format!(
                        "{} hits {} with {} for {} (hp {}, +{} energy)",
                        caster.name, target.name, ability.name, damage, target.hp, granted
                    )
                } else {
                    format!(
                        "{} hits {} with {} for {} (hp {})",
                        caster.name, target.name, ability.name, damage, target.hp
                    )
                };
                self.log.push(round, LogCategory::Damage, message);

                if !target.is_alive() {
                    let fallen = target.name.clone();
                    self.log
                        .push(round, LogCategory::System, format!("{fallen} is defeated"));
                }
            }
            EffectKind::Heal => {
                let amount =
                    (caster.effective_atk as f64 * ability.multiplier).floor().max(0.0) as u32;
                target.hp.gain(amount);
                let message = format!(
                    "{} heals {} with {} for {} (hp {})",
                    caster.name, target.name, ability.name, amount, target.hp
                );
                self.log.push(round, LogCategory::Heal, message);
            }
            EffectKind::Buff => {
                let amount =
                    (caster.effective_atk as f64 * ability.multiplier).floor().max(0.0) as u32;
                target.mods.atk += amount as i64;
                let message = format!(
                    "{} bolsters {} with {} (+{} atk)",
                    caster.name, target.name, ability.name, amount
                );
                self.log.push(round, LogCategory::Heal, message);
            }
        }

        Ok(())
    }

    /// Verifies resource invariants over the whole battlefield.
    fn audit(&self) -> Result<(), InvariantError> {
        let nonce = self.state.nonce();
        for unit in self.state.units.iter() {
            if unit.hp.current > unit.hp.maximum {
                return Err(InvariantError::hp_over_maximum(unit.id, nonce));
            }
            if unit.energy.current > unit.energy.maximum {
                return Err(InvariantError::energy_over_maximum(unit.id, nonce));
            }
        }
        Ok(())
    }
}
