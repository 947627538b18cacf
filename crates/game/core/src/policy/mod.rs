//! Opponent decision policy.
//!
//! Picks an ability and a target for any policy-driven unit, on either
//! side of the battle. The ability choice walks a fixed precedence ladder;
//! the first rule whose condition holds wins:
//!
//! 1. Only one known ability: use it.
//! 2. Group heal when two or more of the actor's side are badly wounded.
//! 3. Single heal when anyone on the actor's side is injured.
//! 4. Rage self-buff when the actor itself is critically wounded.
//! 5. Area damage when facing a wide enemy line.
//! 6. Gamble roll: sometimes improvise with a non-basic damage ability.
//! 7. Basic attack.
//!
//! Targeting for single-enemy abilities runs the scoring in
//! [`score`]; single-ally abilities aim at the most wounded of the
//! actor's side. All draws go through the injected [`RngOracle`], so a
//! battle replays identically from its seed.
//!
//! [`RngOracle`]: crate::env::RngOracle

pub mod score;

use crate::ability::{Ability, Targeting};
use crate::config::BattleConfig;
use crate::engine::AbilityUse;
use crate::env::{BattleEnv, DRAW_GAMBLE_PICK, DRAW_GAMBLE_ROLL, DRAW_JITTER_BASE, compute_seed};
use crate::error::{EngineError, ErrorSeverity};
use crate::state::{BattleState, Side, Unit, UnitId};

use score::{JITTER_SPAN, score_target};

/// Faults raised while deciding for a policy unit.
///
/// The session only consults the policy for living, validated units, so
/// each of these indicates an engine bug rather than bad player input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyError {
    /// Acting unit not found in the battle state.
    #[error("policy actor {0} not found")]
    ActorNotFound(UnitId),

    /// Acting unit has no usable ability descriptors.
    #[error("policy actor {0} knows no abilities")]
    NoKnownAbilities(UnitId),

    /// A single-enemy ability was chosen with no living opponent to aim at.
    #[error("no living opponents for policy actor {0}")]
    NoLivingOpponents(UnitId),
}

impl EngineError for PolicyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "POLICY_ACTOR_NOT_FOUND",
            Self::NoKnownAbilities(_) => "POLICY_NO_KNOWN_ABILITIES",
            Self::NoLivingOpponents(_) => "POLICY_NO_LIVING_OPPONENTS",
        }
    }
}

/// Decides the next action for a policy-driven unit.
///
/// Deterministic given the state's seed and nonce: the same battle always
/// produces the same decision sequence.
pub fn decide(
    state: &BattleState,
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    actor_id: UnitId,
) -> Result<AbilityUse, PolicyError> {
    let actor = state
        .units
        .unit(actor_id)
        .ok_or(PolicyError::ActorNotFound(actor_id))?;

    // Owned descriptor copies. Session start validated every id, so the
    // filter only drops entries when the catalog changed under the battle.
    let known: Vec<Ability> = actor
        .abilities
        .iter()
        .filter_map(|id| env.catalog().ability(id))
        .collect();
    if known.is_empty() {
        return Err(PolicyError::NoKnownAbilities(actor_id));
    }

    let (choice, rule) = pick_ability(state, env, config, actor, &known);
    tracing::debug!("{} picks {} ({})", actor.name, choice.name, rule);

    match choice.targeting {
        Targeting::SingleEnemy => {
            let target = pick_enemy_target(state, env, config, actor)?;
            Ok(AbilityUse::targeted(actor_id, choice.id.clone(), target))
        }
        Targeting::SingleAlly => {
            let target = most_wounded_on(state, actor.side).unwrap_or(actor_id);
            Ok(AbilityUse::targeted(actor_id, choice.id.clone(), target))
        }
        _ => Ok(AbilityUse::new(actor_id, choice.id.clone())),
    }
}

/// Walks the precedence ladder and returns the chosen descriptor plus the
/// rule label for logging.
fn pick_ability<'k>(
    state: &BattleState,
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    actor: &Unit,
    known: &'k [Ability],
) -> (&'k Ability, &'static str) {
    if known.len() == 1 {
        return (&known[0], "only option");
    }

    if let Some(heal) = known.iter().find(|a| a.is_group_heal()) {
        let wounded = state
            .units
            .living_on(actor.side)
            .filter(|unit| unit.hp_fraction() < config.wounded_fraction)
            .count();
        if wounded >= 2 {
            return (heal, "group heal");
        }
    }

    if let Some(heal) = known.iter().find(|a| a.is_single_heal()) {
        if state.units.living_on(actor.side).any(Unit::is_injured) {
            return (heal, "single heal");
        }
    }

    if actor.hp_fraction() < config.critical_fraction {
        if let Some(rage) = known.iter().find(|a| a.is_rage()) {
            return (rage, "rage");
        }
    }

    if state.units.living_count_on(actor.side.opponent()) >= config.area_opponent_min {
        if let Some(area) = known.iter().find(|a| a.is_area_damage()) {
            return (area, "area damage");
        }
    }

    let gambles: Vec<&Ability> = known
        .iter()
        .filter(|a| a.is_damage() && !a.is_basic())
        .collect();
    if !gambles.is_empty() {
        let roll_seed = compute_seed(state.seed, state.nonce(), actor.id.raw(), DRAW_GAMBLE_ROLL);
        if env.rng().roll_d100(roll_seed) <= config.gamble_percent {
            let pick_seed =
                compute_seed(state.seed, state.nonce(), actor.id.raw(), DRAW_GAMBLE_PICK);
            let pick = env.rng().range(pick_seed, 0, gambles.len() as u32 - 1) as usize;
            return (gambles[pick], "gamble");
        }
    }

    if let Some(basic) = known.iter().find(|a| a.is_basic()) {
        return (basic, "basic attack");
    }

    tracing::warn!(
        "{} has no basic attack, falling back to first known ability",
        actor.name
    );
    (&known[0], "fallback")
}

/// Scores every living opponent and aims at the best total.
///
/// Candidates are walked in spawn order and only a strictly higher score
/// displaces the current best, so exact ties resolve to the earlier unit.
fn pick_enemy_target(
    state: &BattleState,
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    actor: &Unit,
) -> Result<UnitId, PolicyError> {
    let candidates: Vec<&Unit> = state.units.living_on(actor.side.opponent()).collect();
    if candidates.is_empty() {
        return Err(PolicyError::NoLivingOpponents(actor.id));
    }

    let strongest_atk = candidates
        .iter()
        .map(|unit| unit.effective_atk())
        .max()
        .unwrap_or(0);

    let mut best: Option<(UnitId, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let jitter_seed = compute_seed(
            state.seed,
            state.nonce(),
            actor.id.raw(),
            DRAW_JITTER_BASE + index as u32,
        );
        let jitter = env.rng().range(jitter_seed, 0, JITTER_SPAN - 1) as f64;

        let score = score_target(
            actor,
            candidate,
            strongest_atk,
            config,
            env.catalog(),
            jitter,
        );
        let total = score.total();
        if best.is_none_or(|(_, best_total)| total > best_total) {
            best = Some((candidate.id, total));
        }
    }

    // candidates is non-empty, so best is always set by the loop.
    let (target, total) = best.ok_or(PolicyError::NoLivingOpponents(actor.id))?;
    tracing::debug!("{} aims at unit {} (score {:.1})", actor.name, target, total);
    Ok(target)
}

/// The living unit on `side` with the lowest hp fraction, earliest spawn
/// first on exact ties.
fn most_wounded_on(state: &BattleState, side: Side) -> Option<UnitId> {
    let mut best: Option<(UnitId, f64)> = None;
    for unit in state.units.living_on(side) {
        let fraction = unit.hp_fraction();
        if best.is_none_or(|(_, best_fraction)| fraction < best_fraction) {
            best = Some((unit.id, fraction));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityId, AbilityTag, EffectKind};
    use crate::env::{PcgRng, RngOracle, StaticCatalog};
    use crate::state::{Controller, UnitDef};

    /// Oracle that returns the same word for every draw.
    ///
    /// `FixedRng(0)` rolls 1 on a d100 and picks index 0 from any range;
    /// `FixedRng(99)` rolls 100.
    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn ability(
        id: &str,
        kind: EffectKind,
        targeting: Targeting,
        tags: Vec<AbilityTag>,
    ) -> Ability {
        Ability {
            id: AbilityId::from(id),
            name: id.to_string(),
            kind,
            multiplier: 1.0,
            cost: 10,
            gain: 0,
            targeting,
            tags,
        }
    }

    fn catalog() -> StaticCatalog {
        [
            ability(
                "strike",
                EffectKind::Damage,
                Targeting::SingleEnemy,
                vec![AbilityTag::Basic],
            ),
            ability("fireball", EffectKind::Damage, Targeting::SingleEnemy, vec![]),
            ability("quake", EffectKind::Damage, Targeting::AllEnemies, vec![]),
            ability("mend", EffectKind::Heal, Targeting::SingleAlly, vec![]),
            ability("chorus", EffectKind::Heal, Targeting::AllAllies, vec![]),
            ability("rage", EffectKind::Buff, Targeting::SelfOnly, vec![]),
        ]
        .into_iter()
        .collect()
    }

    struct Fixture {
        state: BattleState,
        config: BattleConfig,
        catalog: StaticCatalog,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                state: BattleState::with_seed(11),
                config: BattleConfig::default(),
                catalog: catalog(),
            }
        }

        fn spawn(&mut self, name: &str, side: Side, abilities: &[&str]) -> UnitId {
            let mut builder = UnitDef::builder(name).stats(100, 50, 0, 10);
            for id in abilities {
                builder = builder.ability(*id);
            }
            self.state
                .units
                .spawn(&builder.build(), side, Controller::Policy)
                .unwrap()
        }

        fn decide_with(&self, rng: &dyn RngOracle, actor: UnitId) -> AbilityUse {
            let env = BattleEnv::new(&self.catalog, rng);
            decide(&self.state, &env, &self.config, actor).unwrap()
        }

        fn hurt(&mut self, unit: UnitId, amount: u32) {
            self.state.units.unit_mut(unit).unwrap().hp.spend(amount);
        }
    }

    #[test]
    fn sole_known_ability_is_always_used() {
        let mut fx = Fixture::new();
        let actor = fx.spawn("loner", Side::Enemy, &["strike"]);
        let foe = fx.spawn("foe", Side::Ally, &["strike"]);

        let action = fx.decide_with(&PcgRng, actor);
        assert_eq!(action.ability, AbilityId::from("strike"));
        assert_eq!(action.target, Some(foe));
    }

    #[test]
    fn group_heal_fires_when_two_of_the_side_are_wounded() {
        let mut fx = Fixture::new();
        let healer = fx.spawn("healer", Side::Enemy, &["strike", "chorus", "fireball"]);
        let bruiser = fx.spawn("bruiser", Side::Enemy, &["strike"]);
        fx.spawn("foe", Side::Ally, &["strike"]);

        fx.hurt(healer, 60);
        fx.hurt(bruiser, 60);

        let action = fx.decide_with(&PcgRng, healer);
        assert_eq!(action.ability, AbilityId::from("chorus"));
        assert_eq!(action.target, None);
    }

    #[test]
    fn single_heal_aims_at_the_most_wounded_of_the_side() {
        let mut fx = Fixture::new();
        let healer = fx.spawn("healer", Side::Enemy, &["strike", "chorus", "mend"]);
        let scratched = fx.spawn("scratched", Side::Enemy, &["strike"]);
        let mauled = fx.spawn("mauled", Side::Enemy, &["strike"]);
        fx.spawn("foe", Side::Ally, &["strike"]);

        // One wounded unit is not enough for the group heal, so the ladder
        // falls through to the single heal.
        fx.hurt(scratched, 10);
        fx.hurt(mauled, 70);

        let action = fx.decide_with(&PcgRng, healer);
        assert_eq!(action.ability, AbilityId::from("mend"));
        assert_eq!(action.target, Some(mauled));
    }

    #[test]
    fn cornered_units_rage_before_attacking() {
        let mut fx = Fixture::new();
        let berserker = fx.spawn("berserker", Side::Enemy, &["strike", "rage"]);
        fx.spawn("foe", Side::Ally, &["strike"]);

        fx.hurt(berserker, 75);

        // Forces the gamble roll high so rage is the only candidate rule.
        let action = fx.decide_with(&FixedRng(99), berserker);
        assert_eq!(action.ability, AbilityId::from("rage"));
    }

    #[test]
    fn wide_enemy_lines_draw_area_damage() {
        let mut fx = Fixture::new();
        let mage = fx.spawn("mage", Side::Enemy, &["strike", "quake"]);
        for name in ["a", "b", "c"] {
            fx.spawn(name, Side::Ally, &["strike"]);
        }

        let action = fx.decide_with(&FixedRng(99), mage);
        assert_eq!(action.ability, AbilityId::from("quake"));
        assert_eq!(action.target, None);
    }

    #[test]
    fn narrow_lines_skip_area_damage() {
        let mut fx = Fixture::new();
        let mage = fx.spawn("mage", Side::Enemy, &["strike", "quake"]);
        fx.spawn("a", Side::Ally, &["strike"]);
        fx.spawn("b", Side::Ally, &["strike"]);

        // Gamble roll forced high: quake is still a gamble candidate, but
        // with only two opponents the area rule itself must not fire.
        let action = fx.decide_with(&FixedRng(99), mage);
        assert_eq!(action.ability, AbilityId::from("strike"));
    }

    #[test]
    fn low_gamble_roll_improvises_a_special() {
        let mut fx = Fixture::new();
        let duelist = fx.spawn("duelist", Side::Enemy, &["strike", "fireball"]);
        fx.spawn("foe", Side::Ally, &["strike"]);

        let action = fx.decide_with(&FixedRng(0), duelist);
        assert_eq!(action.ability, AbilityId::from("fireball"));
    }

    #[test]
    fn high_gamble_roll_settles_for_the_basic_attack() {
        let mut fx = Fixture::new();
        let duelist = fx.spawn("duelist", Side::Enemy, &["strike", "fireball"]);
        fx.spawn("foe", Side::Ally, &["strike"]);

        let action = fx.decide_with(&FixedRng(99), duelist);
        assert_eq!(action.ability, AbilityId::from("strike"));
    }

    #[test]
    fn lethal_targets_take_priority() {
        let mut fx = Fixture::new();
        let sniper = fx.spawn("sniper", Side::Enemy, &["strike"]);
        let healthy = fx.spawn("healthy", Side::Ally, &["strike"]);
        let dying = fx.spawn("dying", Side::Ally, &["strike"]);
        fx.hurt(dying, 95);

        let action = fx.decide_with(&FixedRng(0), sniper);
        assert_eq!(action.target, Some(dying));
        let _ = healthy;
    }

    #[test]
    fn enemy_healers_are_focused_down() {
        let mut fx = Fixture::new();
        let sniper = fx.spawn("sniper", Side::Enemy, &["strike"]);
        let soldier = fx.spawn("soldier", Side::Ally, &["strike"]);
        let medic = fx.spawn("medic", Side::Ally, &["strike", "mend"]);

        let action = fx.decide_with(&FixedRng(0), sniper);
        assert_eq!(action.target, Some(medic));
        let _ = soldier;
    }

    #[test]
    fn tied_scores_keep_spawn_order() {
        let mut fx = Fixture::new();
        let sniper = fx.spawn("sniper", Side::Enemy, &["strike"]);
        let first = fx.spawn("first", Side::Ally, &["strike"]);
        fx.spawn("second", Side::Ally, &["strike"]);

        let action = fx.decide_with(&FixedRng(0), sniper);
        assert_eq!(action.target, Some(first));
    }

    #[test]
    fn unknown_actor_is_an_internal_fault() {
        let fx = Fixture::new();
        let env = BattleEnv::new(&fx.catalog, &PcgRng);
        let err = decide(&fx.state, &env, &fx.config, UnitId(9)).unwrap_err();
        assert_eq!(err, PolicyError::ActorNotFound(UnitId(9)));
        assert_eq!(err.severity(), ErrorSeverity::Internal);
    }
}
