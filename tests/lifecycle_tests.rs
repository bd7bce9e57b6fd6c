mod common;

use common::{harness, harness_with_gate};
use slotcore::domain::lifecycle::LifecycleState;
use slotcore::error::CoreError;
use slotcore::infrastructure::in_memory::{EngineCall, StaticGate};

#[tokio::test]
async fn test_resumed_only_after_passing_check() {
    let mut h = harness();

    h.controller.on_foreground_init().await.unwrap();
    assert_eq!(h.gate.check_calls(), 0);
    assert_ne!(h.controller.state(), LifecycleState::Resumed);

    h.controller.on_foreground().await.unwrap();
    assert_eq!(h.gate.check_calls(), 1);
    assert_eq!(h.controller.state(), LifecycleState::Resumed);
}

#[tokio::test]
async fn test_check_runs_fresh_on_every_foreground() {
    let mut h = harness();
    h.controller.on_foreground_init().await.unwrap();

    h.controller.on_foreground().await.unwrap();
    h.controller.on_background().await.unwrap();
    h.controller.on_foreground().await.unwrap();
    h.controller.on_background().await.unwrap();
    h.controller.on_foreground().await.unwrap();

    assert_eq!(h.gate.check_calls(), 3);
}

#[tokio::test]
async fn test_init_failure_never_creates_engine() {
    let mut h = harness_with_gate(StaticGate::denying_init());

    let result = h.controller.on_foreground_init().await;
    assert!(matches!(result, Err(CoreError::InitializationFailure)));

    assert!(h.engine.calls().await.is_empty());
    assert_eq!(h.controller.state(), LifecycleState::Uninitialized);
    assert!(
        h.notifier
            .messages()
            .await
            .contains(&"Security initialization failed".to_string())
    );
}

#[tokio::test]
async fn test_check_failure_forces_single_destroy() {
    let mut h = harness();
    h.controller.on_foreground_init().await.unwrap();
    h.controller.on_foreground().await.unwrap();
    h.controller.on_background().await.unwrap();

    // Tampering detected while backgrounded.
    h.gate.deny_checks();
    let result = h.controller.on_foreground().await;
    assert!(matches!(result, Err(CoreError::SecurityViolation)));
    assert_eq!(h.controller.state(), LifecycleState::Destroyed);

    let destroys = h
        .engine
        .calls()
        .await
        .iter()
        .filter(|c| matches!(c, EngineCall::Destroy(_)))
        .count();
    assert_eq!(destroys, 1);
    assert!(
        h.notifier
            .messages()
            .await
            .contains(&"Security violation detected".to_string())
    );
}

#[tokio::test]
async fn test_resumed_never_reentered_after_violation() {
    let mut h = harness();
    h.controller.on_foreground_init().await.unwrap();
    h.controller.on_foreground().await.unwrap();
    h.controller.on_background().await.unwrap();

    h.gate.deny_checks();
    let _ = h.controller.on_foreground().await;
    let calls_after_violation = h.engine.calls().await;

    // Even a now-passing check cannot revive the destroyed session.
    h.gate.allow_checks();
    h.controller.on_foreground().await.unwrap();
    assert_eq!(h.controller.state(), LifecycleState::Destroyed);
    assert_eq!(h.engine.calls().await, calls_after_violation);
}

#[tokio::test]
async fn test_teardown_idempotent() {
    let mut h = harness();
    h.controller.on_foreground_init().await.unwrap();
    h.controller.on_foreground().await.unwrap();

    h.controller.on_teardown().await.unwrap();
    h.controller.on_teardown().await.unwrap();

    let destroys = h
        .engine
        .calls()
        .await
        .iter()
        .filter(|c| matches!(c, EngineCall::Destroy(_)))
        .count();
    assert_eq!(destroys, 1);
    assert_eq!(h.gate.shutdown_calls(), 1);
}

#[tokio::test]
async fn test_teardown_before_init_creates_nothing() {
    let mut h = harness();

    h.controller.on_teardown().await.unwrap();
    assert_eq!(h.controller.state(), LifecycleState::Destroyed);
    assert!(h.engine.calls().await.is_empty());

    // Late init against a destroyed session is ignored.
    h.controller.on_foreground_init().await.unwrap();
    assert_eq!(h.controller.state(), LifecycleState::Destroyed);
    assert!(h.engine.calls().await.is_empty());
}

#[tokio::test]
async fn test_out_of_order_host_calls_ignored() {
    let mut h = harness();
    h.controller.on_foreground_init().await.unwrap();

    // Background before any resume.
    h.controller.on_background().await.unwrap();
    assert_eq!(h.controller.state(), LifecycleState::Created);

    h.controller.on_foreground().await.unwrap();
    // Second foreground while already resumed must not re-check.
    h.controller.on_foreground().await.unwrap();
    assert_eq!(h.gate.check_calls(), 1);
    assert_eq!(h.controller.state(), LifecycleState::Resumed);
}

#[tokio::test]
async fn test_exit_affirmed_tears_down() {
    let mut h = harness();
    h.controller.on_foreground_init().await.unwrap();
    h.controller.on_foreground().await.unwrap();

    let confirmed = h.controller.request_exit().await.unwrap();
    assert!(confirmed);
    assert_eq!(h.prompt.shown(), 1);
    assert_eq!(h.controller.state(), LifecycleState::Destroyed);
}

#[tokio::test]
async fn test_exit_declined_changes_nothing() {
    let mut h = harness();
    h.prompt.set_answer(false);
    h.controller.on_foreground_init().await.unwrap();
    h.controller.on_foreground().await.unwrap();
    let calls_before = h.engine.calls().await;

    let confirmed = h.controller.request_exit().await.unwrap();
    assert!(!confirmed);
    assert_eq!(h.prompt.shown(), 1);
    assert_eq!(h.controller.state(), LifecycleState::Resumed);
    assert_eq!(h.engine.calls().await, calls_before);
}

#[tokio::test]
async fn test_exit_after_destroy_skips_prompt() {
    let mut h = harness();
    h.controller.on_foreground_init().await.unwrap();
    h.controller.on_teardown().await.unwrap();

    let confirmed = h.controller.request_exit().await.unwrap();
    assert!(confirmed);
    assert_eq!(h.prompt.shown(), 0);
}

#[tokio::test]
async fn test_input_forwarded_verbatim() {
    let mut h = harness();
    h.controller.on_foreground_init().await.unwrap();
    h.controller.on_foreground().await.unwrap();

    h.controller
        .on_touch(120.0, 80.0, slotcore::domain::ports::TouchAction::Down)
        .await;
    h.controller.on_key_press(23).await;

    let calls = h.engine.calls().await;
    assert_eq!(
        calls[2],
        EngineCall::Touch {
            x: 120.0,
            y: 80.0,
            action: slotcore::domain::ports::TouchAction::Down
        }
    );
    assert_eq!(calls[3], EngineCall::KeyPress(23));
}

#[tokio::test]
async fn test_input_after_destroy_dropped() {
    let mut h = harness();
    h.controller.on_foreground_init().await.unwrap();
    h.controller.on_teardown().await.unwrap();
    let calls_before = h.engine.calls().await;

    h.controller
        .on_touch(1.0, 1.0, slotcore::domain::ports::TouchAction::Up)
        .await;
    h.controller.on_key_press(4).await;

    assert_eq!(h.engine.calls().await, calls_before);
}
