//! Errors surfaced by the battle session state machine.

use crate::ability::AbilityId;
use crate::engine::{ActionError, InvariantError, ResolveError};
use crate::error::{EngineError, ErrorContext, ErrorSeverity};
use crate::policy::PolicyError;
use crate::state::UnitId;

/// Rejections raised while assembling a session.
///
/// Start validation runs before any battle state exists, so a rejected
/// start constructs nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartError {
    /// The player roster has no units.
    #[error("the roster is empty")]
    EmptyRoster,

    /// The player roster exceeds the team cap.
    #[error("roster of {size} exceeds the team cap of {max}")]
    RosterTooLarge { size: usize, max: usize },

    /// The stage has no enemy lineup.
    #[error("stage has no enemies")]
    EmptyStage,

    /// A unit definition carries no abilities.
    #[error("unit '{unit}' has no abilities")]
    NoAbilities { unit: String },

    /// A unit definition references an ability id missing from the catalog.
    #[error("unit '{unit}' references unknown ability '{ability}'")]
    UnknownAbility { unit: String, ability: AbilityId },

    /// Both rosters together exceed the unit store capacity.
    #[error("{size} units exceed the battlefield cap of {max}")]
    TooManyUnits { size: usize, max: usize },
}

impl EngineError for StartError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "START_EMPTY_ROSTER",
            Self::RosterTooLarge { .. } => "START_ROSTER_TOO_LARGE",
            Self::EmptyStage => "START_EMPTY_STAGE",
            Self::NoAbilities { .. } => "START_NO_ABILITIES",
            Self::UnknownAbility { .. } => "START_UNKNOWN_ABILITY",
            Self::TooManyUnits { .. } => "START_TOO_MANY_UNITS",
        }
    }
}

/// Errors surfaced by a running session.
///
/// The first three variants gate the command surface and leave the
/// encounter untouched; the wrapped variants carry faults raised below the
/// session while an action resolves.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    /// An action was submitted while no player unit is due.
    #[error("no player action is awaited")]
    NotAwaitingInput,

    /// An action was submitted for a unit other than the one due.
    #[error("it is unit {expected}'s turn, not unit {provided}'s")]
    NotActorsTurn { expected: UnitId, provided: UnitId },

    /// A command arrived after the battle resolved.
    #[error("the battle is already resolved")]
    SessionOver,

    /// Action validation rejected the submitted ability use.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The post-action audit found corrupted state.
    #[error(transparent)]
    Invariant(#[from] InvariantError),

    /// The opponent policy could not produce a decision.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl From<ResolveError> for SessionError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Action(inner) => Self::Action(inner),
            ResolveError::Invariant(inner) => Self::Invariant(inner),
        }
    }
}

impl EngineError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotAwaitingInput | Self::NotActorsTurn { .. } | Self::SessionOver => {
                ErrorSeverity::Validation
            }
            Self::Action(inner) => inner.severity(),
            Self::Invariant(inner) => inner.severity(),
            Self::Policy(inner) => inner.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Action(inner) => inner.context(),
            Self::Invariant(inner) => inner.context(),
            Self::Policy(inner) => inner.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAwaitingInput => "SESSION_NOT_AWAITING_INPUT",
            Self::NotActorsTurn { .. } => "SESSION_NOT_ACTORS_TURN",
            Self::SessionOver => "SESSION_OVER",
            Self::Action(inner) => inner.error_code(),
            Self::Invariant(inner) => inner.error_code(),
            Self::Policy(inner) => inner.error_code(),
        }
    }
}
