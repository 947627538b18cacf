//! Battle tuning parameters and capacity limits.

/// Tunable rules shared by the session, resolver, and opponent policy.
///
/// Capacity limits are compile-time constants because they parameterize the
/// bounded collections inside [`crate::state::BattleState`]; the remaining
/// fields are plain data so embedders (or a tuning file) can adjust them
/// per difficulty mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Energy granted to an ally-side unit each time it takes a hit.
    pub on_hit_energy_gain: u32,

    /// Retained log entries; once full, the oldest entry is evicted.
    pub log_capacity: usize,

    /// Percent chance (d100) that a policy unit gambles on a special
    /// damage ability instead of its basic attack.
    pub gamble_percent: u32,

    /// Hp fraction below which a unit counts as wounded for heal decisions.
    pub wounded_fraction: f64,

    /// Hp fraction below which a unit is critical (rage trigger, focus fire).
    pub critical_fraction: f64,

    /// Minimum living opponents before area damage is preferred.
    pub area_opponent_min: usize,

    /// Energy fraction at or above which a target is worth denying.
    pub energy_deny_fraction: f64,
}

impl BattleConfig {
    /// Maximum units the player may field in one encounter.
    pub const MAX_TEAM_SIZE: usize = 4;

    /// Maximum units across both sides, including future summons.
    pub const MAX_UNITS: usize = 16;

    /// Maximum abilities a single unit can know.
    pub const MAX_ABILITIES_PER_UNIT: usize = 6;

    /// Default energy granted to an ally per hit taken.
    pub const DEFAULT_ON_HIT_ENERGY_GAIN: u32 = 20;

    /// Default log capacity.
    pub const DEFAULT_LOG_CAPACITY: usize = 100;

    /// Default gamble chance for the opponent policy.
    pub const DEFAULT_GAMBLE_PERCENT: u32 = 60;

    /// Default wounded threshold (below half hp).
    pub const DEFAULT_WOUNDED_FRACTION: f64 = 0.5;

    /// Default critical threshold.
    pub const DEFAULT_CRITICAL_FRACTION: f64 = 0.3;

    /// Default living-opponent count that unlocks area damage.
    pub const DEFAULT_AREA_OPPONENT_MIN: usize = 3;

    /// Default energy-deny threshold as a fraction of maximum energy.
    pub const DEFAULT_ENERGY_DENY_FRACTION: f64 = 0.8;
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            on_hit_energy_gain: Self::DEFAULT_ON_HIT_ENERGY_GAIN,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            gamble_percent: Self::DEFAULT_GAMBLE_PERCENT,
            wounded_fraction: Self::DEFAULT_WOUNDED_FRACTION,
            critical_fraction: Self::DEFAULT_CRITICAL_FRACTION,
            area_opponent_min: Self::DEFAULT_AREA_OPPONENT_MIN,
            energy_deny_fraction: Self::DEFAULT_ENERGY_DENY_FRACTION,
        }
    }
}
