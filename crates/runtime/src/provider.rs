//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so battles can
//! run with live input, scripted fixtures, or custom front-ends.
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use battle_core::{AbilityId, BattleSnapshot, UnitId};

use crate::error::{Result, RuntimeError};

/// A decision for the unit the session is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Resolve one ability, optionally aimed at an explicit target.
    UseAbility {
        ability: AbilityId,
        target: Option<UnitId>,
    },
    /// Concede the battle.
    Retreat,
}

/// Trait for providing player commands based on the current battle state.
///
/// Different implementations can handle:
/// - Live input (from UI/CLI)
/// - Scripted/replayed battles
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide a command for the given unit based on the current snapshot.
    async fn provide_command(
        &self,
        unit: UnitId,
        snapshot: &BattleSnapshot,
    ) -> Result<PlayerCommand>;
}

/// Provider fed from an mpsc channel, for interactive front-ends.
pub struct ChannelProvider {
    commands: Mutex<mpsc::Receiver<PlayerCommand>>,
}

impl ChannelProvider {
    /// Creates a provider plus the sender half a front-end pushes into.
    pub fn new(capacity: usize) -> (mpsc::Sender<PlayerCommand>, Self) {
        let (command_tx, command_rx) = mpsc::channel(capacity);
        (
            command_tx,
            Self {
                commands: Mutex::new(command_rx),
            },
        )
    }
}

#[async_trait]
impl ActionProvider for ChannelProvider {
    async fn provide_command(
        &self,
        _unit: UnitId,
        _snapshot: &BattleSnapshot,
    ) -> Result<PlayerCommand> {
        self.commands
            .lock()
            .await
            .recv()
            .await
            .ok_or(RuntimeError::PlayerChannelClosed)
    }
}

/// Provider that replays a fixed command sequence, for scripted battles.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<PlayerCommand>>,
}

impl ScriptedProvider {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            script: Mutex::new(commands.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_command(
        &self,
        _unit: UnitId,
        _snapshot: &BattleSnapshot,
    ) -> Result<PlayerCommand> {
        self.script
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted)
    }
}
