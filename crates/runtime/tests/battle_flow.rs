//! End-to-end combat flow through the runtime: commands in, events out.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

use gauntlet_core::engine::ActionReport;
use gauntlet_core::{
    BalanceTables, BattleConfig, BattleState, RngOracle, Side, SkillKind, StatusKind, TurnPhase,
};
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

/// Waits until control returns to the player or the battle leaves combat.
async fn wait_for_player_turn(turns: &mut broadcast::Receiver<BattleEvent>) {
    loop {
        if let BattleEvent::TurnPassed { phase, .. } = next_event(turns).await {
            match phase {
                TurnPhase::PlayerTurn | TurnPhase::LevelTransition | TurnPhase::GameOver => break,
                TurnPhase::EnemyTurn => {}
            }
        }
    }
}

#[tokio::test]
async fn fresh_session_is_ready_for_player_input() {
    let runtime = BattleRuntime::builder()
        .seed(7)
        .timings(Timings::instant())
        .build();
    let handle = runtime.handle();

    let state = handle.query_state().await.expect("query should succeed");
    assert_eq!(state.seed, 7);
    assert_eq!(state.turn.phase, TurnPhase::PlayerTurn);
    assert_eq!(state.progression.level, 1);
    assert_eq!(state.player.hp, state.player.max_hp);

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test]
async fn a_player_attack_draws_the_enemy_response() {
    let runtime = BattleRuntime::builder()
        .seed(42)
        .timings(Timings::instant())
        .rng(AlwaysLow)
        .build();
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    let mut turns = handle.subscribe(Topic::Turn);

    handle.attack().await.expect("attack command should send");

    // Player strike: minimum rolls are 10 attack into 3 defense, and the
    // pinned d100 always crits, so 7 damage scales to 10.
    let event = next_event(&mut combat).await;
    let BattleEvent::ActionResolved {
        report: ActionReport::Attack(strike),
        ..
    } = event
    else {
        panic!("expected the player strike, got {event:?}");
    };
    assert_eq!(strike.attacker, Side::Player);
    assert_eq!(strike.damage, 10);
    assert!(strike.crit);

    // The enemy answers on its own after the pacing delay (zero here).
    let event = next_event(&mut combat).await;
    let BattleEvent::ActionResolved {
        report: ActionReport::Attack(strike),
        ..
    } = event
    else {
        panic!("expected the enemy strike, got {event:?}");
    };
    assert_eq!(strike.attacker, Side::Enemy);

    wait_for_player_turn(&mut turns).await;
    let state = handle.query_state().await.expect("query should succeed");
    assert_eq!(state.turn.phase, TurnPhase::PlayerTurn);
    assert_eq!(state.turn.round, 2);
    assert_eq!(state.enemy.hp, 90);

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test]
async fn skills_without_rage_are_rejected_without_state_change() {
    let runtime = BattleRuntime::builder()
        .seed(3)
        .timings(Timings::instant())
        .build();
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);

    let before = handle.query_state().await.expect("query should succeed");
    handle
        .use_skill(SkillKind::HeavyStrike)
        .await
        .expect("command should send even when the action is rejected");

    let event = next_event(&mut combat).await;
    let BattleEvent::ActionRejected { reason, .. } = event else {
        panic!("expected a rejection, got {event:?}");
    };
    assert!(reason.contains("insufficient rage"), "reason: {reason}");

    let after = handle.query_state().await.expect("query should succeed");
    assert_eq!(before, after, "a rejected action must not mutate state");

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test]
async fn a_stunned_enemy_forfeits_its_turn() {
    let tables = BalanceTables::default();
    let mut initial = BattleState::new(&BattleConfig::new(), &tables, 9);
    initial.player.rage = 5_000;

    let runtime = BattleRuntime::builder()
        .timings(Timings::instant())
        .rng(AlwaysLow)
        .initial_state(initial)
        .build();
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);

    handle
        .use_skill(SkillKind::HeavyStrike)
        .await
        .expect("skill command should send");

    let event = next_event(&mut combat).await;
    let BattleEvent::ActionResolved {
        report: ActionReport::Skill(skill),
        ..
    } = event
    else {
        panic!("expected the skill resolution, got {event:?}");
    };
    assert!(skill.stunned, "the pinned d100 must land the stun");

    // The enemy's answer is a skip, not a strike.
    let event = next_event(&mut combat).await;
    assert!(
        matches!(
            event,
            BattleEvent::ActionResolved {
                report: ActionReport::TurnSkipped,
                ..
            }
        ),
        "expected the stun skip, got {event:?}"
    );

    let state = handle.query_state().await.expect("query should succeed");
    assert_eq!(state.turn.phase, TurnPhase::PlayerTurn);
    assert!(state.enemy.statuses.has(StatusKind::Stun));
    assert_eq!(state.player.hp, state.player.max_hp, "no enemy strike landed");

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test]
async fn identical_seeds_replay_identically() {
    async fn run_session() -> BattleState {
        let runtime = BattleRuntime::builder()
            .seed(123)
            .timings(Timings::instant())
            .build();
        let handle = runtime.handle();
        let mut turns = handle.subscribe(Topic::Turn);

        handle.attack().await.expect("attack should send");
        wait_for_player_turn(&mut turns).await;
        handle.defend().await.expect("defend should send");
        wait_for_player_turn(&mut turns).await;
        handle.attack().await.expect("attack should send");
        wait_for_player_turn(&mut turns).await;

        let state = handle.query_state().await.expect("query should succeed");
        runtime.shutdown().await.expect("shutdown should succeed");
        state
    }

    let first = run_session().await;
    let second = run_session().await;
    assert_eq!(first, second);
}
