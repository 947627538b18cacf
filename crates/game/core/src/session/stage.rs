//! Stage definitions and reward payouts.

use crate::state::UnitDef;

/// Currencies credited to the player when a stage is cleared.
///
/// The engine reports the payout through
/// [`granted_reward`](crate::session::BattleSession::granted_reward); the
/// caller's economy subsystem does the actual crediting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub gold: u32,
    pub essence: u32,
}

impl Reward {
    pub const fn new(gold: u32, essence: u32) -> Self {
        Self { gold, essence }
    }
}

/// A battle stage: the enemy lineup plus its economy numbers.
///
/// The entry cost is validated and charged by the caller before the session
/// starts; the engine never touches player currency.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageDef {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entry_cost: u32,
    pub reward: Reward,
    pub enemies: Vec<UnitDef>,
}
