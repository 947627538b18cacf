//! High-level runtime orchestrator.
//!
//! The runtime owns the background worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a battle.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use battle_core::{
    BattleConfig, BattleCue, BattleEnv, BattleSession, Outcome, PcgRng, StageDef, StaticCatalog,
    UnitDef,
};

use crate::error::{Result, RuntimeError};
use crate::event::BattleEvent;
use crate::handle::BattleHandle;
use crate::provider::{ActionProvider, PlayerCommand};
use crate::worker::{BattleWorker, Command};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle_config: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle_config: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates one battle.
///
/// Design: the runtime owns the worker and coordinates execution.
/// [`BattleHandle`] provides a cloneable facade for clients.
pub struct BattleRuntime {
    handle: BattleHandle,
    provider: Option<Box<dyn ActionProvider>>,
    worker_handle: JoinHandle<()>,
}

impl BattleRuntime {
    /// Create a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Subscribe to battle events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<BattleEvent> {
        self.handle.subscribe_events()
    }

    /// Set the player command provider.
    pub fn set_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.provider = Some(Box::new(provider));
    }

    /// Advance to the next cue, sourcing player commands as needed.
    ///
    /// When the session pauses, the configured provider is asked for the
    /// awaited unit's command and that command is submitted before the cue
    /// is returned. Requires a provider once the first pause is reached.
    pub async fn step(&mut self) -> Result<BattleCue> {
        let cue = self.handle.advance().await?;

        if let BattleCue::AwaitingPlayer(unit) = cue {
            let provider = self.provider.as_ref().ok_or(RuntimeError::ProviderNotSet)?;
            let snapshot = self.handle.snapshot().await?;

            match provider.provide_command(unit, &snapshot).await? {
                PlayerCommand::UseAbility { ability, target } => {
                    self.handle.submit_action(unit, ability, target).await?;
                }
                PlayerCommand::Retreat => {
                    self.handle.retreat().await?;
                }
            }
        }

        Ok(cue)
    }

    /// Run the battle until it resolves, returning the terminal outcome.
    pub async fn run_to_completion(&mut self) -> Result<Outcome> {
        loop {
            if let BattleCue::Resolved(outcome) = self.step().await? {
                return Ok(outcome);
            }
        }
    }

    /// Shutdown the runtime gracefully.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

impl std::fmt::Debug for BattleRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleRuntime")
            .field("provider_set", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<StaticCatalog>,
    roster: Vec<UnitDef>,
    stage: Option<StageDef>,
    seed: u64,
    provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            roster: Vec::new(),
            stage: None,
            seed: 0,
            provider: None,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the engine tuning knobs only.
    pub fn battle_config(mut self, config: BattleConfig) -> Self {
        self.config.battle_config = config;
        self
    }

    /// Set the ability catalog battles resolve against.
    pub fn catalog(mut self, catalog: StaticCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the player-controlled roster.
    pub fn roster(mut self, roster: impl IntoIterator<Item = UnitDef>) -> Self {
        self.roster = roster.into_iter().collect();
        self
    }

    /// Set the stage to fight.
    pub fn stage(mut self, stage: StageDef) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Set the seed all in-battle randomness derives from.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the player command provider (optional).
    pub fn provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker.
    pub async fn build(self) -> Result<BattleRuntime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let stage = self.stage.ok_or(RuntimeError::MissingStage)?;

        let session = {
            let rng = PcgRng;
            let env = BattleEnv::new(&catalog, &rng);
            BattleSession::start(
                self.config.battle_config,
                &env,
                &self.roster,
                &stage,
                self.seed,
            )
            .map_err(RuntimeError::Start)?
        };

        info!(
            "battle session started: stage {}, {} challengers, seed {}",
            stage.id,
            self.roster.len(),
            self.seed
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<BattleEvent>(self.config.event_buffer_size);

        let handle = BattleHandle::new(command_tx, event_tx.clone());
        let worker = BattleWorker::new(session, catalog, command_rx, event_tx);

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(BattleRuntime {
            handle,
            provider: self.provider,
            worker_handle,
        })
    }
}
