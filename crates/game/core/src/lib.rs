//! Deterministic battle resolution and data types shared across clients.
//!
//! `battle-core` defines the canonical rules (abilities, turn scheduling,
//! effect resolution, opponent policy) and exposes pure APIs that can be
//! reused by both the async runtime and offline tools. All state mutation
//! flows through [`session::BattleSession`], and supporting crates depend
//! on the types re-exported here.
pub mod ability;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod log;
pub mod policy;
pub mod session;
pub mod state;

pub use ability::{Ability, AbilityId, AbilityTag, EffectKind, Targeting};
pub use config::BattleConfig;
pub use engine::{AbilityUse, ActionError, InvariantError, ResolveError, Resolver};
pub use env::{AbilityCatalog, BattleEnv, PcgRng, RngOracle, StaticCatalog};
pub use error::{EngineError, ErrorContext, ErrorSeverity};
pub use log::{BattleLog, LogCategory, LogEntry};
pub use policy::PolicyError;
pub use session::{
    BattleCue, BattleSession, BattleSnapshot, Outcome, Reward, SessionError, SessionPhase,
    StageDef, StartError, UnitView,
};
pub use state::{
    BattleState, Controller, ResourceMeter, Round, Side, StatModifiers, Unit, UnitDef,
    UnitDefBuilder, UnitId,
};
