//! Target scoring for single-enemy abilities.
//!
//! Each living opponent is scored independently; the policy aims at the
//! highest total. All scoring inputs except the jitter draw are pure reads
//! of the battle state.

use crate::config::BattleConfig;
use crate::env::AbilityCatalog;
use crate::state::Unit;

/// Added when the expected hit would finish the candidate off. Large enough
/// to dominate every other component combined.
pub const KILL_BONUS: f64 = 10_000.0;

/// Added when the candidate is already below the critical hp fraction.
pub const EXECUTE_BONUS: f64 = 120.0;

/// Added when the candidate knows any healing ability.
pub const HEALER_BONUS: f64 = 80.0;

/// Added when the candidate's energy has built up to the deny threshold.
pub const ENERGY_DENY_BONUS: f64 = 60.0;

/// Scale for the candidate's attack relative to the strongest candidate.
pub const THREAT_WEIGHT: f64 = 50.0;

/// Jitter draws land in `0..JITTER_SPAN`, enough to break near-ties without
/// overriding a real bonus.
pub const JITTER_SPAN: u32 = 8;

/// Score breakdown for one candidate target.
///
/// Kept as components rather than a bare sum so tests and debug logging can
/// see which bonus drove a pick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TargetScore {
    /// Expected damage of a plain hit against this candidate.
    pub base: f64,
    /// [`KILL_BONUS`] when the expected hit is lethal.
    pub kill: f64,
    /// [`EXECUTE_BONUS`] when the candidate is critically wounded.
    pub execute: f64,
    /// [`HEALER_BONUS`] when the candidate can heal its side.
    pub healer: f64,
    /// [`ENERGY_DENY_BONUS`] when the candidate is close to full energy.
    pub energy_deny: f64,
    /// Share of [`THREAT_WEIGHT`] proportional to relative attack.
    pub threat: f64,
    /// Small random tiebreaker.
    pub jitter: f64,
}

impl TargetScore {
    pub fn total(&self) -> f64 {
        self.base + self.kill + self.execute + self.healer + self.energy_deny + self.threat
            + self.jitter
    }
}

/// Expected damage of a plain unmodified hit.
///
/// Same shape as the resolver's damage formula with a 1.0 multiplier, so
/// the kill check below agrees with what a basic attack would actually do.
pub fn expected_damage(attacker_atk: u32, defender_def: u32) -> u32 {
    let raw = attacker_atk as f64 - defender_def as f64 * 0.5;
    raw.floor().max(1.0) as u32
}

/// Scores one candidate for the given attacker.
///
/// `strongest_atk` is the highest effective attack among all candidates and
/// `jitter` the candidate's pre-drawn tiebreaker value.
pub fn score_target(
    attacker: &Unit,
    candidate: &Unit,
    strongest_atk: u32,
    config: &BattleConfig,
    catalog: &dyn AbilityCatalog,
    jitter: f64,
) -> TargetScore {
    let base = expected_damage(attacker.effective_atk(), candidate.effective_def());

    let kill = if base >= candidate.hp.current {
        KILL_BONUS
    } else {
        0.0
    };

    let execute = if candidate.hp_fraction() < config.critical_fraction {
        EXECUTE_BONUS
    } else {
        0.0
    };

    let knows_heal = candidate
        .abilities
        .iter()
        .filter_map(|id| catalog.ability(id))
        .any(|ability| ability.is_heal());
    let healer = if knows_heal { HEALER_BONUS } else { 0.0 };

    let energy_deny = if candidate.energy.fraction() >= config.energy_deny_fraction {
        ENERGY_DENY_BONUS
    } else {
        0.0
    };

    let threat = if strongest_atk > 0 {
        candidate.effective_atk() as f64 / strongest_atk as f64 * THREAT_WEIGHT
    } else {
        0.0
    };

    TargetScore {
        base: base as f64,
        kill,
        execute,
        healer,
        energy_deny,
        threat,
        jitter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticCatalog;
    use crate::state::{Controller, Side, UnitDef, UnitId};

    fn unit(def: &UnitDef, id: u32) -> Unit {
        def.to_unit(UnitId(id), Side::Enemy, Controller::Policy)
    }

    #[test]
    fn expected_damage_has_a_floor_of_one() {
        assert_eq!(expected_damage(10, 1000), 1);
        assert_eq!(expected_damage(150, 60), 120);
    }

    #[test]
    fn lethal_hits_dominate_every_other_bonus() {
        let catalog = StaticCatalog::new();
        let config = BattleConfig::default();
        let attacker_def = UnitDef::builder("attacker").stats(100, 50, 0, 10).build();
        let attacker = unit(&attacker_def, 0);

        // 40 hp left: a 50-damage hit finishes it.
        let mut dying = unit(&UnitDef::builder("dying").stats(100, 10, 0, 10).build(), 1);
        dying.hp.spend(60);

        // Healthy but maximally threatening.
        let tough = unit(&UnitDef::builder("tough").stats(1000, 500, 0, 10).build(), 2);

        let dying_score = score_target(&attacker, &dying, 500, &config, &catalog, 0.0);
        let tough_score = score_target(&attacker, &tough, 500, &config, &catalog, 7.0);

        assert!(dying_score.kill > 0.0);
        assert_eq!(tough_score.kill, 0.0);
        assert!(dying_score.total() > tough_score.total());
    }

    #[test]
    fn charged_units_draw_the_deny_bonus() {
        let catalog = StaticCatalog::new();
        let config = BattleConfig::default();
        let attacker = unit(&UnitDef::builder("attacker").stats(100, 10, 0, 10).build(), 0);

        let charged_def = UnitDef::builder("charged")
            .stats(1000, 10, 0, 10)
            .energy(80, 100)
            .build();
        let idle_def = UnitDef::builder("idle")
            .stats(1000, 10, 0, 10)
            .energy(20, 100)
            .build();

        let charged = score_target(&attacker, &unit(&charged_def, 1), 10, &config, &catalog, 0.0);
        let idle = score_target(&attacker, &unit(&idle_def, 2), 10, &config, &catalog, 0.0);

        assert_eq!(charged.energy_deny, ENERGY_DENY_BONUS);
        assert_eq!(idle.energy_deny, 0.0);
    }

    #[test]
    fn threat_scales_with_relative_attack() {
        let catalog = StaticCatalog::new();
        let config = BattleConfig::default();
        let attacker = unit(&UnitDef::builder("attacker").stats(100, 10, 0, 10).build(), 0);

        let strong = unit(&UnitDef::builder("strong").stats(1000, 200, 0, 10).build(), 1);
        let weak = unit(&UnitDef::builder("weak").stats(1000, 50, 0, 10).build(), 2);

        let strong_score = score_target(&attacker, &strong, 200, &config, &catalog, 0.0);
        let weak_score = score_target(&attacker, &weak, 200, &config, &catalog, 0.0);

        assert_eq!(strong_score.threat, THREAT_WEIGHT);
        assert_eq!(weak_score.threat, THREAT_WEIGHT * 0.25);
    }
}
