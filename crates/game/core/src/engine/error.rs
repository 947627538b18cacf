//! Errors surfaced by the ability resolution pipeline.

use crate::ability::AbilityId;
use crate::error::{EngineError, ErrorContext, ErrorSeverity};
use crate::state::{Side, UnitId};

/// Rejections raised while validating an ability use.
///
/// Validation runs before any mutation, so a rejected action leaves the
/// battle state exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Acting unit not found in the battle state.
    #[error("acting unit {0} not found")]
    ActorNotFound(UnitId),

    /// Acting unit is incapacitated (hp = 0).
    #[error("acting unit {0} is incapacitated")]
    ActorDown(UnitId),

    /// Ability is not on the actor's learned list.
    #[error("unit {unit} does not know ability '{ability}'")]
    AbilityNotKnown { unit: UnitId, ability: AbilityId },

    /// Ability id has no descriptor in the catalog.
    #[error("ability '{0}' is not in the catalog")]
    AbilityNotInCatalog(AbilityId),

    /// Single-target ability was submitted without a target.
    #[error("ability '{0}' requires an explicit target")]
    MissingTarget(AbilityId),

    /// Explicit target not found in the battle state.
    #[error("target unit {0} not found")]
    TargetNotFound(UnitId),

    /// Explicit target is incapacitated (hp = 0).
    #[error("target unit {0} is incapacitated")]
    TargetDown(UnitId),

    /// Explicit target is on the wrong side for this ability.
    #[error("target unit {unit} is not on the {expected} side")]
    WrongSide { unit: UnitId, expected: Side },
}

impl EngineError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActorNotFound(_) | TargetNotFound(_) => ErrorSeverity::Validation,
            ActorDown(_) | TargetDown(_) => ErrorSeverity::Recoverable,
            AbilityNotKnown { .. } | AbilityNotInCatalog(_) => ErrorSeverity::Validation,
            MissingTarget(_) | WrongSide { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            ActorDown(_) => "ACTION_ACTOR_DOWN",
            AbilityNotKnown { .. } => "ACTION_ABILITY_NOT_KNOWN",
            AbilityNotInCatalog(_) => "ACTION_ABILITY_NOT_IN_CATALOG",
            MissingTarget(_) => "ACTION_MISSING_TARGET",
            TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            TargetDown(_) => "ACTION_TARGET_DOWN",
            WrongSide { .. } => "ACTION_WRONG_SIDE",
        }
    }
}

/// Post-application audit failures.
///
/// The apply phase clamps every resource write, so these indicate a bug in
/// the resolver rather than a bad input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantError {
    /// A unit ended the action with hp above its maximum.
    #[error("unit {unit} ended the action with hp above maximum")]
    HpOverMaximum {
        unit: UnitId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    /// A unit ended the action with energy above its maximum.
    #[error("unit {unit} ended the action with energy above maximum")]
    EnergyOverMaximum {
        unit: UnitId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },
}

impl InvariantError {
    /// Creates an HpOverMaximum error with context.
    pub fn hp_over_maximum(unit: UnitId, nonce: u64) -> Self {
        Self::HpOverMaximum {
            unit,
            context: ErrorContext::new(nonce)
                .with_unit(unit)
                .with_message("hp exceeded maximum after apply"),
        }
    }

    /// Creates an EnergyOverMaximum error with context.
    pub fn energy_over_maximum(unit: UnitId, nonce: u64) -> Self {
        Self::EnergyOverMaximum {
            unit,
            context: ErrorContext::new(nonce)
                .with_unit(unit)
                .with_message("energy exceeded maximum after apply"),
        }
    }
}

impl EngineError for InvariantError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::HpOverMaximum { context, .. } => Some(context),
            Self::EnergyOverMaximum { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HpOverMaximum { .. } => "INVARIANT_HP_OVER_MAXIMUM",
            Self::EnergyOverMaximum { .. } => "INVARIANT_ENERGY_OVER_MAXIMUM",
        }
    }
}

/// Umbrella error for a full resolution pass.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl EngineError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Action(e) => e.severity(),
            Self::Invariant(e) => e.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Action(e) => e.context(),
            Self::Invariant(e) => e.context(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Action(e) => e.error_code(),
            Self::Invariant(e) => e.error_code(),
        }
    }
}
