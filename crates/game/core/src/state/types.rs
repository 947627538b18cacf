//! Primitive identity and measurement types shared across the battle state.

use std::fmt;

/// Unique identifier for a unit tracked in the battle state.
///
/// Ids are dense indices allocated in roster order (allies first, then stage
/// enemies); units are never removed mid-battle, so an id stays valid for the
/// whole encounter even after the unit falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl UnitId {
    /// Returns the raw index value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One full consumption of a turn order. Rounds are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round(pub u32);

impl Round {
    pub const FIRST: Self = Self(1);

    /// Returns the round that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which roster a unit fights for.
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
pub enum Side {
    /// The player's team, built from the roster input.
    Ally,
    /// Stage opposition.
    Enemy,
}

impl Side {
    /// Returns the opposing side.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::Ally,
        }
    }

    /// Whether units on this side earn energy when they take a hit.
    ///
    /// Battlefield-wide rule, not a per-ability flag: only the ally side
    /// charges up from being hit.
    #[inline]
    pub const fn grants_on_hit_energy(self) -> bool {
        matches!(self, Self::Ally)
    }
}

/// Who decides a unit's actions.
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
pub enum Controller {
    /// Awaits an externally submitted ability/target selection.
    Human,
    /// Acts synchronously through the opponent policy.
    Policy,
}

/// Integer resource meter (health, energy) tracked per unit.
///
/// `current` never leaves `[0, maximum]`: both mutation helpers saturate
/// instead of erroring, and both report how much actually moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Creates a meter filled to its maximum.
    pub fn at_max(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Creates an empty meter.
    pub fn empty(maximum: u32) -> Self {
        Self {
            current: 0,
            maximum,
        }
    }

    /// Adds to the meter, clamped at the maximum. Returns the amount
    /// actually gained.
    pub fn gain(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - before
    }

    /// Removes from the meter, clamped at zero. Returns the amount
    /// actually spent.
    pub fn spend(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// True when the meter has been drained to zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// True when the meter sits at its maximum.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.current == self.maximum
    }

    /// Fill level in `[0.0, 1.0]`. An unbounded meter reads as empty.
    pub fn fraction(&self) -> f64 {
        if self.maximum == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.maximum)
    }
}

impl fmt::Display for ResourceMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_gain_clamps_at_maximum() {
        let mut meter = ResourceMeter::new(90, 100);
        let gained = meter.gain(25);
        assert_eq!(gained, 10);
        assert_eq!(meter.current, 100);
        assert!(meter.is_full());
    }

    #[test]
    fn meter_spend_clamps_at_zero() {
        let mut meter = ResourceMeter::new(15, 100);
        let spent = meter.spend(40);
        assert_eq!(spent, 15);
        assert_eq!(meter.current, 0);
        assert!(meter.is_empty());
    }

    #[test]
    fn meter_new_never_exceeds_maximum() {
        let meter = ResourceMeter::new(250, 100);
        assert_eq!(meter.current, 100);
    }

    #[test]
    fn fraction_handles_zero_maximum() {
        let meter = ResourceMeter::empty(0);
        assert_eq!(meter.fraction(), 0.0);
    }

    #[test]
    fn side_opponent_flips() {
        assert_eq!(Side::Ally.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Ally);
        assert!(Side::Ally.grants_on_hit_energy());
        assert!(!Side::Enemy.grants_on_hit_energy());
    }

    #[test]
    fn round_advances() {
        assert_eq!(Round::FIRST.next(), Round(2));
        assert_eq!(Round::default(), Round::FIRST);
    }
}
