//! Background task that owns the authoritative [`BattleSession`].
//!
//! Receives commands from [`crate::BattleHandle`], drives the session, and
//! broadcasts [`BattleEvent`]s after every mutation.
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use battle_core::{
    AbilityId, BattleCue, BattleEnv, BattleSession, BattleSnapshot, LogEntry, PcgRng, SessionPhase,
    StaticCatalog, UnitId,
};

use crate::error::Result;
use crate::event::BattleEvent;

/// Commands that can be sent to the battle worker.
pub enum Command {
    /// Drive the session until it pauses for input or ends.
    Advance {
        reply: oneshot::Sender<Result<BattleCue>>,
    },
    /// Resolve an ability for the unit the session is waiting on.
    SubmitAction {
        actor: UnitId,
        ability: AbilityId,
        target: Option<UnitId>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Concede the battle.
    Retreat { reply: oneshot::Sender<Result<()>> },
    /// Read-only snapshot of the current state.
    QuerySnapshot {
        reply: oneshot::Sender<BattleSnapshot>,
    },
    /// Copy of the combat log collected so far.
    QueryLog {
        reply: oneshot::Sender<Vec<LogEntry>>,
    },
}

/// Background task that processes battle commands.
pub struct BattleWorker {
    session: BattleSession,
    catalog: StaticCatalog,
    rng: PcgRng,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
    /// Log entries already shipped inside a [`BattleEvent::StateChanged`].
    published: usize,
    resolution_announced: bool,
}

impl BattleWorker {
    pub(crate) fn new(
        session: BattleSession,
        catalog: StaticCatalog,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        Self {
            session,
            catalog,
            rng: PcgRng,
            command_rx,
            event_tx,
            published: 0,
            resolution_announced: false,
        }
    }

    /// Main worker loop.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!("battle worker shutting down");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Advance { reply } => {
                let result = self.advance();
                if reply.send(result).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::SubmitAction {
                actor,
                ability,
                target,
                reply,
            } => {
                let result = self.submit(actor, ability, target);
                if reply.send(result).is_err() {
                    debug!("SubmitAction reply channel closed (caller dropped)");
                }
            }
            Command::Retreat { reply } => {
                let result = self.retreat();
                if reply.send(result).is_err() {
                    debug!("Retreat reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.session.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
            Command::QueryLog { reply } => {
                if reply.send(self.session.log().to_vec()).is_err() {
                    debug!("QueryLog reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn advance(&mut self) -> Result<BattleCue> {
        let was_over = self.session.is_over();
        let cue = {
            let env = BattleEnv::new(&self.catalog, &self.rng);
            self.session.advance(&env)?
        };
        // Advancing a finished session just repeats the terminal cue.
        if !was_over {
            self.publish_progress();
        }
        Ok(cue)
    }

    fn submit(&mut self, actor: UnitId, ability: AbilityId, target: Option<UnitId>) -> Result<()> {
        {
            let env = BattleEnv::new(&self.catalog, &self.rng);
            self.session.submit_action(&env, actor, ability, target)?;
        }
        self.publish_progress();
        Ok(())
    }

    fn retreat(&mut self) -> Result<()> {
        self.session.retreat()?;
        self.publish_progress();
        Ok(())
    }

    /// Broadcasts the new state plus whatever cue the session stopped on.
    ///
    /// Send failures mean nobody is subscribed right now, which is fine.
    fn publish_progress(&mut self) {
        let snapshot = self.session.snapshot();
        let entries = self.fresh_entries();
        let _ = self
            .event_tx
            .send(BattleEvent::StateChanged { snapshot, entries });

        match self.session.phase() {
            SessionPhase::AwaitingPlayer(unit) => {
                let _ = self.event_tx.send(BattleEvent::AwaitingPlayer { unit });
            }
            SessionPhase::Resolved(outcome) if !self.resolution_announced => {
                self.resolution_announced = true;
                tracing::info!("battle resolved: {}", outcome);
                let _ = self.event_tx.send(BattleEvent::Resolved {
                    outcome,
                    reward: self.session.granted_reward(),
                });
            }
            _ => {}
        }
    }

    /// Returns the log entries recorded since the previous publish.
    fn fresh_entries(&mut self) -> Vec<LogEntry> {
        let log = self.session.log();
        let fresh = log.total_recorded() - self.published;
        self.published = log.total_recorded();
        log.iter()
            .skip(log.len().saturating_sub(fresh))
            .cloned()
            .collect()
    }
}
