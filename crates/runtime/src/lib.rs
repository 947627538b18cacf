//! Async driver for deterministic battle sessions.
//!
//! This crate wires the engine in `battle-core` into a tokio runtime: a
//! background worker owns the [`battle_core::BattleSession`], clients talk to
//! it through a cloneable [`BattleHandle`], and front-ends observe progress by
//! subscribing to [`BattleEvent`] broadcasts.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`handle`] exposes the command facade clients interact with
//! - [`provider`] abstracts where player decisions come from
//! - [`event`] defines the broadcast surface
//! - the worker task stays internal to the crate
pub mod error;
pub mod event;
pub mod handle;
pub mod provider;
pub mod runtime;

mod worker;

pub use error::{Result, RuntimeError};
pub use event::BattleEvent;
pub use handle::BattleHandle;
pub use provider::{ActionProvider, ChannelProvider, PlayerCommand, ScriptedProvider};
pub use runtime::{BattleRuntime, RuntimeBuilder, RuntimeConfig};
