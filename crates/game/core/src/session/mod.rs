//! Battle session lifecycle.
//!
//! [`BattleSession`] owns one encounter end to end: it validates the roster
//! and stage, spawns both sides, schedules rounds, drives policy units, and
//! suspends at exactly one point, the [`SessionPhase::AwaitingPlayer`] phase
//! where a human decision is due. Callers pump the battle with
//! [`advance`](BattleSession::advance) and answer suspensions with
//! [`submit_action`](BattleSession::submit_action); everything between two
//! suspension points runs synchronously to completion.
//!
//! Rewards are paid out through [`granted_reward`](BattleSession::granted_reward)
//! on victory only. A retreat resolves the battle as [`Outcome::Abandoned`]
//! and pays nothing.

mod error;
mod snapshot;
mod stage;

pub use error::{SessionError, StartError};
pub use snapshot::{BattleSnapshot, UnitView};
pub use stage::{Reward, StageDef};

use crate::ability::AbilityId;
use crate::config::BattleConfig;
use crate::engine::{AbilityUse, Resolver, compute_order};
use crate::env::BattleEnv;
use crate::log::{BattleLog, LogCategory};
use crate::policy;
use crate::state::{BattleState, Controller, Round, Side, UnitDef, UnitId};

/// How a finished battle ended.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Outcome {
    /// Every enemy fell; the stage reward is granted.
    Victory,
    /// Every ally fell.
    Defeat,
    /// The player retreated; no reward.
    Abandoned,
}

/// Where the session currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionPhase {
    /// A new round is about to be scheduled.
    RoundStart,
    /// The current turn order is being consumed.
    Acting,
    /// The order is spent; the round marker and rollover are due.
    RoundEnd,
    /// Suspended until the player submits this unit's action.
    AwaitingPlayer(UnitId),
    /// Terminal; every later command is rejected.
    Resolved(Outcome),
}

/// What [`BattleSession::advance`] stopped on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleCue {
    /// A human decision is due for this unit.
    AwaitingPlayer(UnitId),
    /// The battle is over.
    Resolved(Outcome),
}

/// One running encounter.
#[derive(Debug)]
pub struct BattleSession {
    config: BattleConfig,
    state: BattleState,
    /// Turn order for the current round, fastest first.
    order: Vec<UnitId>,
    /// Index of the next entry in `order` to act.
    cursor: usize,
    phase: SessionPhase,
    log: BattleLog,
    /// The stage's payout, granted only on victory.
    reward: Reward,
    granted: Option<Reward>,
}

impl BattleSession {
    /// Validates the inputs and assembles a session.
    ///
    /// Allies spawn first (player controlled), then the stage enemies
    /// (policy controlled). Nothing is constructed on a validation error.
    /// The stage's entry cost is the caller's concern.
    pub fn start(
        config: BattleConfig,
        env: &BattleEnv<'_>,
        roster: &[UnitDef],
        stage: &StageDef,
        seed: u64,
    ) -> Result<Self, StartError> {
        if roster.is_empty() {
            return Err(StartError::EmptyRoster);
        }
        if roster.len() > BattleConfig::MAX_TEAM_SIZE {
            return Err(StartError::RosterTooLarge {
                size: roster.len(),
                max: BattleConfig::MAX_TEAM_SIZE,
            });
        }
        if stage.enemies.is_empty() {
            return Err(StartError::EmptyStage);
        }
        for def in roster.iter().chain(stage.enemies.iter()) {
            if def.abilities.is_empty() {
                return Err(StartError::NoAbilities {
                    unit: def.name.clone(),
                });
            }
            for id in &def.abilities {
                if !env.catalog().contains(id) {
                    return Err(StartError::UnknownAbility {
                        unit: def.name.clone(),
                        ability: id.clone(),
                    });
                }
            }
        }
        let total = roster.len() + stage.enemies.len();
        if total > BattleConfig::MAX_UNITS {
            return Err(StartError::TooManyUnits {
                size: total,
                max: BattleConfig::MAX_UNITS,
            });
        }

        let mut state = BattleState::with_seed(seed);
        let full = StartError::TooManyUnits {
            size: total,
            max: BattleConfig::MAX_UNITS,
        };
        for def in roster {
            state
                .units
                .spawn(def, Side::Ally, Controller::Human)
                .map_err(|_| full.clone())?;
        }
        for def in &stage.enemies {
            state
                .units
                .spawn(def, Side::Enemy, Controller::Policy)
                .map_err(|_| full.clone())?;
        }

        let mut log = BattleLog::with_capacity(config.log_capacity);
        log.push(
            Round::FIRST,
            LogCategory::System,
            format!("battle begins at {}", stage.name),
        );
        tracing::debug!(
            "battle at {} begins: {} allies vs {} enemies",
            stage.name,
            roster.len(),
            stage.enemies.len()
        );

        Ok(Self {
            config,
            state,
            order: Vec::new(),
            cursor: 0,
            phase: SessionPhase::RoundStart,
            log,
            reward: stage.reward,
            granted: None,
        })
    }

    /// Runs the battle forward to the next suspension point.
    ///
    /// Policy units act as they come up; the call returns when a human
    /// decision is due or the battle has resolved. Both cues are idempotent:
    /// calling `advance` again without satisfying them returns the same cue.
    pub fn advance(&mut self, env: &BattleEnv<'_>) -> Result<BattleCue, SessionError> {
        loop {
            match self.phase {
                SessionPhase::AwaitingPlayer(unit) => {
                    return Ok(BattleCue::AwaitingPlayer(unit));
                }
                SessionPhase::Resolved(outcome) => {
                    return Ok(BattleCue::Resolved(outcome));
                }
                SessionPhase::RoundStart => {
                    // An empty battlefield can only mean a wipe that was
                    // somehow not caught after the action; re-check rather
                    // than schedule an empty round.
                    if self.check_termination(Side::Enemy) {
                        continue;
                    }
                    self.order = compute_order(&self.state.units);
                    self.cursor = 0;
                    self.phase = SessionPhase::Acting;
                }
                SessionPhase::Acting => {
                    let Some(&unit_id) = self.order.get(self.cursor) else {
                        self.phase = SessionPhase::RoundEnd;
                        continue;
                    };
                    let Some(unit) = self.state.units.unit(unit_id) else {
                        self.cursor += 1;
                        continue;
                    };
                    // Scheduled at round start but felled since.
                    if !unit.is_alive() {
                        self.cursor += 1;
                        continue;
                    }
                    match unit.controller {
                        Controller::Human => {
                            self.phase = SessionPhase::AwaitingPlayer(unit_id);
                        }
                        Controller::Policy => {
                            let defender = unit.side.opponent();
                            let action =
                                policy::decide(&self.state, env, &self.config, unit_id)?;
                            Resolver::new(&mut self.state, &self.config, &mut self.log)
                                .resolve(env, &action)?;
                            self.cursor += 1;
                            self.check_termination(defender);
                        }
                    }
                }
                SessionPhase::RoundEnd => {
                    let finished = self.state.round;
                    self.log.push(
                        finished,
                        LogCategory::System,
                        format!("round {} ends", finished),
                    );
                    self.state.round = finished.next();
                    self.phase = SessionPhase::RoundStart;
                }
            }
        }
    }

    /// Answers an [`AwaitingPlayer`](SessionPhase::AwaitingPlayer) suspension.
    ///
    /// Rejected with the encounter unchanged unless the session is awaiting
    /// exactly this unit and the ability use validates. On success the turn
    /// is consumed; call [`advance`](Self::advance) to continue the battle.
    pub fn submit_action(
        &mut self,
        env: &BattleEnv<'_>,
        actor: UnitId,
        ability: AbilityId,
        target: Option<UnitId>,
    ) -> Result<(), SessionError> {
        let expected = match self.phase {
            SessionPhase::AwaitingPlayer(unit) => unit,
            SessionPhase::Resolved(_) => return Err(SessionError::SessionOver),
            _ => return Err(SessionError::NotAwaitingInput),
        };
        if actor != expected {
            return Err(SessionError::NotActorsTurn {
                expected,
                provided: actor,
            });
        }

        let defender = self
            .state
            .units
            .unit(actor)
            .map(|unit| unit.side.opponent())
            .unwrap_or(Side::Enemy);
        let action = match target {
            Some(target) => AbilityUse::targeted(actor, ability, target),
            None => AbilityUse::new(actor, ability),
        };
        Resolver::new(&mut self.state, &self.config, &mut self.log).resolve(env, &action)?;

        self.cursor += 1;
        self.phase = SessionPhase::Acting;
        self.check_termination(defender);
        Ok(())
    }

    /// Concedes the battle.
    ///
    /// Legal at any point while the battle runs, including while a player
    /// action is awaited. Resolves as [`Outcome::Abandoned`] with no reward.
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        if self.is_over() {
            return Err(SessionError::SessionOver);
        }
        self.log
            .push(self.state.round, LogCategory::System, "the party retreats");
        self.resolve_outcome(Outcome::Abandoned);
        Ok(())
    }

    /// Resolves the battle if one side has been wiped out.
    ///
    /// The defending side is checked first, so a mutual wipe counts in the
    /// acting side's favor.
    fn check_termination(&mut self, defender: Side) -> bool {
        for side in [defender, defender.opponent()] {
            if self.state.units.side_is_wiped(side) {
                let outcome = match side {
                    Side::Enemy => Outcome::Victory,
                    Side::Ally => Outcome::Defeat,
                };
                self.resolve_outcome(outcome);
                return true;
            }
        }
        false
    }

    fn resolve_outcome(&mut self, outcome: Outcome) {
        if outcome == Outcome::Victory {
            self.granted = Some(self.reward);
        }
        let marker = match outcome {
            Outcome::Victory => "victory, the enemy line is broken",
            Outcome::Defeat => "defeat, the party has fallen",
            Outcome::Abandoned => "the battle is abandoned",
        };
        self.log.push(self.state.round, LogCategory::System, marker);
        self.phase = SessionPhase::Resolved(outcome);
        tracing::debug!("battle resolved: {}", outcome);
    }

    /// Point-in-time view of the whole battle for presentation.
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            round: self.state.round,
            phase: self.phase,
            units: self.state.units.iter().map(UnitView::of).collect(),
        }
    }

    /// The battle log, oldest entry first.
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Current round number.
    pub fn round(&self) -> Round {
        self.state.round
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::Resolved(_))
    }

    /// The outcome, once resolved.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            SessionPhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The reward to credit, `Some` only after a victory.
    pub fn granted_reward(&self) -> Option<Reward> {
        self.granted
    }

    /// The underlying battle state, for digests and diagnostics.
    pub fn state(&self) -> &BattleState {
        &self.state
    }
}
