//! Events emitted while a battle runs, for front-ends to observe.
//!
//! Consumers subscribe through [`crate::BattleHandle::subscribe_events`] and
//! react to progress without blocking the worker loop.
use battle_core::{BattleSnapshot, LogEntry, Outcome, Reward, UnitId};

/// Events broadcast by the runtime during a battle.
#[derive(Debug, Clone)]
pub enum BattleEvent {
    /// The session advanced; `entries` holds the log lines recorded since
    /// the previous event.
    StateChanged {
        snapshot: BattleSnapshot,
        entries: Vec<LogEntry>,
    },
    /// The session is suspended until this unit's command is submitted.
    AwaitingPlayer { unit: UnitId },
    /// The battle reached a terminal outcome. Emitted exactly once.
    Resolved {
        outcome: Outcome,
        reward: Option<Reward>,
    },
}
