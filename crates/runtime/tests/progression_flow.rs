//! Victory, the upgrade draft, defeat, and session restarts.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

use gauntlet_core::{BalanceTables, BattleConfig, BattleState, RngOracle, TurnPhase};
use gauntlet_runtime::{BattleEvent, BattleRuntime, Timings, Topic};

/// Pins every roll to its minimum and every percent check to success.
struct AlwaysLow;

impl RngOracle for AlwaysLow {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }
}

async fn next_event(rx: &mut broadcast::Receiver<BattleEvent>) -> BattleEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for an event")
        .expect("event stream closed")
}

/// A battle one strike away from victory.
fn near_victory(seed: u64) -> BattleState {
    let tables = BalanceTables::default();
    let mut state = BattleState::new(&BattleConfig::new(), &tables, seed);
    state.enemy.hp = 1;
    state
}

#[tokio::test]
async fn victory_opens_the_draft_and_advancing_starts_the_next_level() {
    let runtime = BattleRuntime::builder()
        .timings(Timings::instant())
        .initial_state(near_victory(11))
        .build();
    let handle = runtime.handle();
    let mut progression = handle.subscribe(Topic::Progression);

    handle.attack().await.expect("attack should send");

    let event = next_event(&mut progression).await;
    assert!(
        matches!(event, BattleEvent::Victory { level: 1 }),
        "expected the victory, got {event:?}"
    );

    // The draft opens on its own after the level-up delay (zero here).
    let event = next_event(&mut progression).await;
    let BattleEvent::UpgradesOffered { offer } = event else {
        panic!("expected the upgrade offer, got {event:?}");
    };
    assert_ne!(offer.stats[0], offer.stats[1]);
    assert!(offer.passive.is_some(), "both passives are still unlearned");

    // Advancing before any pick is a rejection, not an error.
    handle.advance_level().await.expect("command should send");
    let state = handle.query_state().await.expect("query should succeed");
    assert_eq!(state.progression.level, 1, "advance must wait for a pick");

    handle.choose_stat(0).await.expect("pick should send");
    let event = next_event(&mut progression).await;
    assert!(
        matches!(event, BattleEvent::UpgradeChosen { .. }),
        "expected the pick, got {event:?}"
    );

    handle.advance_level().await.expect("advance should send");
    let event = next_event(&mut progression).await;
    assert!(
        matches!(event, BattleEvent::LevelStarted { level: 2 }),
        "expected the next level, got {event:?}"
    );

    let state = handle.query_state().await.expect("query should succeed");
    assert_eq!(state.progression.level, 2);
    assert_eq!(state.turn.phase, TurnPhase::PlayerTurn);
    assert_eq!(state.player.hp, state.player.max_hp);
    assert_eq!(state.player.rage, 0);
    // Level 2 enemy from the scaling table.
    assert_eq!(state.enemy.max_hp, 120);
    assert_eq!(state.enemy.hp, 120);

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test]
async fn defeat_locks_the_board_until_restart() {
    let tables = BalanceTables::default();
    let mut initial = BattleState::new(&BattleConfig::new(), &tables, 13);
    initial.player.hp = 1;

    let runtime = BattleRuntime::builder()
        .timings(Timings::instant())
        .rng(AlwaysLow)
        .initial_state(initial)
        .build();
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    let mut progression = handle.subscribe(Topic::Progression);

    // The player strikes; the enemy's automatic answer finishes them.
    handle.attack().await.expect("attack should send");
    let event = next_event(&mut progression).await;
    assert!(
        matches!(event, BattleEvent::Defeat { level: 1 }),
        "expected the defeat, got {event:?}"
    );

    let state = handle.query_state().await.expect("query should succeed");
    assert_eq!(state.turn.phase, TurnPhase::GameOver);

    // Drain the two strikes, then confirm further commands bounce.
    let _ = next_event(&mut combat).await;
    let _ = next_event(&mut combat).await;
    handle.attack().await.expect("command should send");
    let event = next_event(&mut combat).await;
    let BattleEvent::ActionRejected { reason, .. } = event else {
        panic!("expected a rejection, got {event:?}");
    };
    assert!(reason.contains("over"), "reason: {reason}");

    handle.restart().await.expect("restart should send");
    let event = next_event(&mut progression).await;
    assert!(
        matches!(event, BattleEvent::SessionStarted { .. }),
        "expected the fresh session, got {event:?}"
    );

    let state = handle.query_state().await.expect("query should succeed");
    assert_eq!(state.turn.phase, TurnPhase::PlayerTurn);
    assert_eq!(state.progression.level, 1);
    assert_eq!(state.player.hp, state.player.max_hp);

    runtime.shutdown().await.expect("shutdown should succeed");
}
