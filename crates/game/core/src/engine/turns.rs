//! Round order computation.
//!
//! Each round acts in strict descending speed order over the units alive at
//! the moment the round starts. The order is a snapshot: units that fall
//! during the round are skipped at their slot, and units that join or revive
//! mid-round (neither happens today) would wait for the next round.

use crate::state::{UnitId, UnitStore};

/// Computes the acting order for one round.
///
/// Only living units are scheduled. Ties in speed keep spawn order, so two
/// equal-speed units act in the order they were added to the battle.
/// An empty battlefield yields an empty order; the session treats that as a
/// termination re-check rather than an error.
pub fn compute_order(units: &UnitStore) -> Vec<UnitId> {
    let mut order: Vec<(UnitId, u32)> = units
        .living()
        .map(|unit| (unit.id, unit.spd))
        .collect();

    // Stable sort keeps spawn order between equal speeds.
    order.sort_by(|a, b| b.1.cmp(&a.1));

    order.into_iter().map(|(id, _)| id).collect()
}
