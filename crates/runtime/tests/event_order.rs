use async_trait::async_trait;

use battle_core::{
    Ability, AbilityTag, BattleSnapshot, EffectKind, LogEntry, Outcome, Reward, Side, StageDef,
    StaticCatalog, Targeting, UnitDef, UnitId,
};
use battle_content::{AbilityRegistry, CharacterRegistry, StageRegistry};
use battle_runtime::{
    ActionProvider, BattleEvent, BattleRuntime, PlayerCommand, ScriptedProvider,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

struct FirstEnemyStriker;

#[async_trait]
impl ActionProvider for FirstEnemyStriker {
    async fn provide_command(
        &self,
        unit: UnitId,
        snapshot: &BattleSnapshot,
    ) -> battle_runtime::Result<PlayerCommand> {
        let ability = snapshot
            .unit(unit)
            .and_then(|view| view.abilities.first().cloned())
            .expect("awaited unit knows an ability");
        let target = snapshot.living_on(Side::Enemy).next().map(|view| view.id);
        Ok(PlayerCommand::UseAbility { ability, target })
    }
}

fn shipped_content() -> (StaticCatalog, Vec<UnitDef>, StageDef) {
    let abilities = AbilityRegistry::load().expect("ability catalog loads");
    let characters = CharacterRegistry::load().expect("character pool loads");
    let stages = StageRegistry::load().expect("stage catalog loads");

    let roster = characters
        .roster(&["cinder-squire", "moss-archer"])
        .expect("roster templates exist");
    let stage = stages.get("verdant-1").expect("stage exists").clone();

    (abilities.into_catalog(), roster, stage)
}

/// Subscribers see the battle in order: an opening state change, a state
/// change before every pause, and a single resolution at the very end whose
/// shipped entries reassemble the full combat log.
#[tokio::test]
async fn events_arrive_in_battle_order() {
    init_tracing();
    let (catalog, roster, stage) = shipped_content();

    let mut runtime = BattleRuntime::builder()
        .catalog(catalog)
        .roster(roster)
        .stage(stage)
        .seed(7)
        .provider(FirstEnemyStriker)
        .build()
        .await
        .expect("battle starts");

    let handle = runtime.handle();
    let mut events_rx = runtime.subscribe_events();

    let outcome = runtime.run_to_completion().await.expect("battle resolves");
    assert_eq!(outcome, Outcome::Victory);

    let mut events = Vec::new();
    loop {
        let event = events_rx.recv().await.expect("event stream intact");
        let done = matches!(event, BattleEvent::Resolved { .. });
        events.push(event);
        if done {
            break;
        }
    }

    // The very first broadcast carries the opening marker.
    assert!(matches!(
        &events[0],
        BattleEvent::StateChanged { entries, .. }
            if entries.first().is_some_and(|entry| entry.message.contains("battle begins"))
    ));

    // Exactly one resolution, and it closes the stream.
    let resolutions = events
        .iter()
        .filter(|event| matches!(event, BattleEvent::Resolved { .. }))
        .count();
    assert_eq!(resolutions, 1);
    assert!(matches!(
        events.last(),
        Some(BattleEvent::Resolved {
            outcome: Outcome::Victory,
            reward: Some(_),
        })
    ));

    // Every pause announcement follows the state change that caused it.
    for (index, event) in events.iter().enumerate() {
        if matches!(event, BattleEvent::AwaitingPlayer { .. }) {
            assert!(
                index > 0 && matches!(events[index - 1], BattleEvent::StateChanged { .. }),
                "pause at index {index} lacks a preceding state change"
            );
        }
    }

    // Entry deltas shipped with the state changes reassemble the log.
    let collected: Vec<LogEntry> = events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::StateChanged { entries, .. } => Some(entries.clone()),
            _ => None,
        })
        .flatten()
        .collect();
    let log = handle.log().await.expect("log query");
    assert_eq!(collected, log);

    runtime.shutdown().await.expect("worker joins");
}

/// A retreat mid-pause resolves the battle as abandoned: no reward in the
/// resolution event, both markers in the log.
#[tokio::test]
async fn retreat_resolves_abandoned_without_reward() {
    init_tracing();

    let strike = Ability {
        id: "strike".into(),
        name: "Strike".into(),
        kind: EffectKind::Damage,
        multiplier: 1.0,
        cost: 0,
        gain: 15,
        targeting: Targeting::SingleEnemy,
        tags: vec![AbilityTag::Basic],
    };
    let catalog: StaticCatalog = [strike].into_iter().collect();

    let stage = StageDef {
        id: "duel".into(),
        name: "Duel Pit".into(),
        entry_cost: 0,
        reward: Reward::new(10, 1),
        enemies: vec![
            UnitDef::builder("Dummy")
                .stats(60, 20, 0, 5)
                .ability("strike")
                .build(),
        ],
    };
    let roster = vec![
        UnitDef::builder("Brave")
            .stats(100, 50, 10, 10)
            .ability("strike")
            .build(),
    ];

    let mut runtime = BattleRuntime::builder()
        .catalog(catalog)
        .roster(roster)
        .stage(stage)
        .seed(5)
        .provider(ScriptedProvider::new([PlayerCommand::Retreat]))
        .build()
        .await
        .expect("battle starts");

    let handle = runtime.handle();
    let mut events_rx = runtime.subscribe_events();

    let outcome = runtime.run_to_completion().await.expect("battle resolves");
    assert_eq!(outcome, Outcome::Abandoned);

    loop {
        match events_rx.recv().await.expect("resolution event") {
            BattleEvent::Resolved { outcome, reward } => {
                assert_eq!(outcome, Outcome::Abandoned);
                assert_eq!(reward, None);
                break;
            }
            _ => {}
        }
    }

    let log = handle.log().await.expect("log query");
    assert!(log.iter().any(|entry| entry.message.contains("retreats")));
    assert!(log.iter().any(|entry| entry.message.contains("abandoned")));

    runtime.shutdown().await.expect("worker joins");
}
