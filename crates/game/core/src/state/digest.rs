//! State digest for replay verification.

/// Computes a compact commitment to the full battle state.
///
/// Two sessions fed the same seed and the same command script reach
/// identical digests after every action; the determinism tests assert
/// exactly that, and external replay tooling can do the same.
///
/// # Design
///
/// - bincode gives a deterministic byte encoding of the state
/// - SHA-256 turns it into a fixed 32-byte commitment
/// - The digest covers everything replay-relevant: seed, nonce, round,
///   and every unit's meters, modifiers, and ability list
///
/// Requires the `serde` feature.
#[cfg(feature = "serde")]
pub fn state_digest(state: &super::BattleState) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    // bincode serialization of the state is deterministic and consistent
    if let Ok(bytes) = bincode::serialize(state) {
        hasher.update(&bytes);
    }
    hasher.finalize().into()
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::state_digest;
    use crate::state::{BattleState, Controller, Side, UnitDef};

    fn spawn_scout(state: &mut BattleState) {
        let def = UnitDef::builder("scout")
            .stats(50, 10, 2, 7)
            .ability("strike")
            .build();
        state
            .units
            .spawn(&def, Side::Ally, Controller::Human)
            .unwrap();
    }

    #[test]
    fn identical_states_share_a_digest() {
        let mut a = BattleState::with_seed(42);
        let mut b = BattleState::with_seed(42);
        spawn_scout(&mut a);
        spawn_scout(&mut b);

        assert_eq!(hex::encode(state_digest(&a)), hex::encode(state_digest(&b)));
    }

    #[test]
    fn any_divergence_changes_the_digest() {
        let mut a = BattleState::with_seed(42);
        let mut b = BattleState::with_seed(43);
        spawn_scout(&mut a);
        spawn_scout(&mut b);
        assert_ne!(state_digest(&a), state_digest(&b));

        let mut c = BattleState::with_seed(42);
        spawn_scout(&mut c);
        c.units.unit_mut(crate::state::UnitId(0)).unwrap().hp.spend(1);
        assert_ne!(state_digest(&a), state_digest(&c));
    }
}
