//! Ability descriptors - immutable definitions of what a skill does.
//!
//! Descriptors are looked up by id in an [`crate::env::AbilityCatalog`] and
//! handed out as owned copies; the resolver and the opponent policy only
//! ever see a unit's copy, never a shared reference into the catalog.

use std::fmt;

/// Catalog key for an ability (`"strike"`, `"mend"`, ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityId(pub String);

impl AbilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AbilityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an ability does to each resolved target.
///
/// Debuffs and self-buffs are not separate kinds; they are buffs with the
/// corresponding targeting rule.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    /// Reduce target hp by the damage formula.
    Damage,
    /// Restore target hp, clamped at its maximum.
    Heal,
    /// Add to the target's cumulative attack modifier.
    Buff,
}

/// How an ability selects its targets.
///
/// One variant per targeting rule; a variant carries only the fields its
/// resolution path needs, so the resolver never probes for optional data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Targeting {
    /// One living enemy, chosen by the caller (human pick or policy scoring).
    SingleEnemy,
    /// Every enemy alive when the volley starts.
    AllEnemies,
    /// `draws` independent uniform picks from the enemies alive at each draw.
    RandomEnemies { draws: u32 },
    /// One living ally, chosen by the caller.
    SingleAlly,
    /// Every ally alive when the volley starts.
    AllAllies,
    /// The caster itself; any explicit target argument is ignored.
    SelfOnly,
}

impl Targeting {
    /// True when the caller must supply an explicit target.
    ///
    /// The resolver never picks targets for single-target rules; a missing
    /// target there is a caller contract violation.
    #[inline]
    pub const fn requires_explicit_target(&self) -> bool {
        matches!(self, Self::SingleEnemy | Self::SingleAlly)
    }

    /// True for rules that can strike more than one enemy.
    #[inline]
    pub const fn is_area(&self) -> bool {
        matches!(self, Self::AllEnemies | Self::RandomEnemies { .. })
    }

    /// The side an explicit target must belong to, from the caster's
    /// perspective. `None` for rules that resolve their own targets.
    pub fn explicit_target_side(
        &self,
        caster_side: crate::state::Side,
    ) -> Option<crate::state::Side> {
        match self {
            Self::SingleEnemy => Some(caster_side.opponent()),
            Self::SingleAlly => Some(caster_side),
            _ => None,
        }
    }
}

/// Tags for gameplay logic (policy heuristics, future synergies).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityTag {
    /// The no-frills fallback attack the policy reaches for last.
    Basic,
}

/// Complete immutable definition of one ability.
///
/// Descriptors are shared static data: the engine copies them out of the
/// catalog (via [`crate::env::AbilityCatalog::ability`]) and never mutates
/// the catalog's own entry, so per-instance annotations (resolved display
/// names, UI decorations) stay local to the copy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    /// Catalog key this descriptor is registered under.
    pub id: AbilityId,

    /// Resolved display name used in log entries.
    pub name: String,

    /// What happens to each resolved target.
    pub kind: EffectKind,

    /// Scalar applied to the caster's effective attack.
    pub multiplier: f64,

    /// Energy deducted before the effect resolves (clamped at zero).
    pub cost: u32,

    /// Energy granted after the cost, clamped at maximum energy.
    ///
    /// Independent of `cost`; an ability may both spend and generate.
    pub gain: u32,

    /// How targets are selected.
    pub targeting: Targeting,

    /// Gameplay tags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<AbilityTag>,
}

impl Ability {
    /// True when tagged as the basic fallback attack.
    pub fn is_basic(&self) -> bool {
        self.tags.contains(&AbilityTag::Basic)
    }

    /// True for any damage-dealing ability.
    #[inline]
    pub fn is_damage(&self) -> bool {
        self.kind == EffectKind::Damage
    }

    /// True for any healing ability.
    #[inline]
    pub fn is_heal(&self) -> bool {
        self.kind == EffectKind::Heal
    }

    /// Heal that reaches the whole team at once.
    pub fn is_group_heal(&self) -> bool {
        self.kind == EffectKind::Heal && self.targeting == Targeting::AllAllies
    }

    /// Heal aimed at a single chosen ally.
    pub fn is_single_heal(&self) -> bool {
        self.kind == EffectKind::Heal && self.targeting == Targeting::SingleAlly
    }

    /// Self-buff of the kind a cornered unit uses to lash out.
    pub fn is_rage(&self) -> bool {
        self.kind == EffectKind::Buff && self.targeting == Targeting::SelfOnly
    }

    /// Damage that can strike several enemies in one action.
    pub fn is_area_damage(&self) -> bool {
        self.kind == EffectKind::Damage && self.targeting.is_area()
    }

    /// True when the caller must supply an explicit target.
    #[inline]
    pub fn requires_explicit_target(&self) -> bool {
        self.targeting.requires_explicit_target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ability(kind: EffectKind, targeting: Targeting) -> Ability {
        Ability {
            id: AbilityId::from("test"),
            name: "Test".to_owned(),
            kind,
            multiplier: 1.0,
            cost: 0,
            gain: 0,
            targeting,
            tags: Vec::new(),
        }
    }

    #[test]
    fn classification_follows_kind_and_targeting() {
        assert!(ability(EffectKind::Heal, Targeting::AllAllies).is_group_heal());
        assert!(ability(EffectKind::Heal, Targeting::SingleAlly).is_single_heal());
        assert!(ability(EffectKind::Buff, Targeting::SelfOnly).is_rage());
        assert!(ability(EffectKind::Damage, Targeting::AllEnemies).is_area_damage());
        assert!(
            ability(EffectKind::Damage, Targeting::RandomEnemies { draws: 3 }).is_area_damage()
        );
        assert!(!ability(EffectKind::Damage, Targeting::SingleEnemy).is_area_damage());
        assert!(!ability(EffectKind::Buff, Targeting::AllAllies).is_rage());
    }

    #[test]
    fn only_single_target_rules_require_an_explicit_target() {
        assert!(Targeting::SingleEnemy.requires_explicit_target());
        assert!(Targeting::SingleAlly.requires_explicit_target());
        assert!(!Targeting::AllEnemies.requires_explicit_target());
        assert!(!Targeting::RandomEnemies { draws: 2 }.requires_explicit_target());
        assert!(!Targeting::AllAllies.requires_explicit_target());
        assert!(!Targeting::SelfOnly.requires_explicit_target());
    }

    #[test]
    fn explicit_target_side_is_relative_to_the_caster() {
        use crate::state::Side;

        assert_eq!(
            Targeting::SingleEnemy.explicit_target_side(Side::Ally),
            Some(Side::Enemy)
        );
        assert_eq!(
            Targeting::SingleEnemy.explicit_target_side(Side::Enemy),
            Some(Side::Ally)
        );
        assert_eq!(
            Targeting::SingleAlly.explicit_target_side(Side::Enemy),
            Some(Side::Enemy)
        );
        assert_eq!(Targeting::SelfOnly.explicit_target_side(Side::Ally), None);
    }

    #[test]
    fn basic_tag_marks_the_fallback_attack() {
        let mut basic = ability(EffectKind::Damage, Targeting::SingleEnemy);
        basic.tags.push(AbilityTag::Basic);
        assert!(basic.is_basic());
        assert!(!ability(EffectKind::Damage, Targeting::SingleEnemy).is_basic());
    }
}
