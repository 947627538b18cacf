//! Round scheduling and ability resolution pipeline.
//!
//! The [`Resolver`] is the authoritative reducer for
//! [`crate::state::BattleState`]: every hp, energy, and modifier write flows
//! through its validate, apply, audit phases and lands in the battle log.
//! [`compute_order`] builds the per-round acting order the session walks.

mod error;
mod resolve;
mod turns;

pub use error::{ActionError, InvariantError, ResolveError};
pub use resolve::{AbilityUse, Resolver};
pub use turns::compute_order;
