//! Cloneable facade for issuing commands to the runtime.
//!
//! [`BattleHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from the worker.
use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{AbilityId, BattleCue, BattleSnapshot, LogEntry, UnitId};

use crate::error::{Result, RuntimeError};
use crate::event::BattleEvent;
use crate::worker::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
}

impl BattleHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Drives the session until it pauses for input or ends.
    pub async fn advance(&self) -> Result<BattleCue> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Advance { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Resolves an ability for the unit the session is waiting on.
    pub async fn submit_action(
        &self,
        actor: UnitId,
        ability: AbilityId,
        target: Option<UnitId>,
    ) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SubmitAction {
                actor,
                ability,
                target,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Concedes the battle.
    pub async fn retreat(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Retreat { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Queries a read-only snapshot of the current battle state.
    pub async fn snapshot(&self) -> Result<BattleSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QuerySnapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Queries a copy of the combat log collected so far.
    pub async fn log(&self) -> Result<Vec<LogEntry>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryLog { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to battle events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<BattleEvent> {
        self.event_tx.subscribe()
    }
}
