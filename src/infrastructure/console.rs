use crate::domain::lifecycle::EngineHandle;
use crate::domain::payment::{Amount, PaymentCompleter, PaymentToken};
use crate::domain::ports::{
    ConfirmationPrompt, ExecutionEngine, HostNotifier, PaymentSurface, TouchAction,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

/// Execution engine stand-in that prints every forwarded call to stdout,
/// one line per call, in forwarding order.
pub struct ConsoleEngine;

#[async_trait]
impl ExecutionEngine for ConsoleEngine {
    async fn on_create(&self, handle: &EngineHandle) {
        println!("engine: create #{}", handle.id());
    }

    async fn on_destroy(&self, handle: &EngineHandle) {
        println!("engine: destroy #{}", handle.id());
    }

    async fn on_pause(&self, _handle: &EngineHandle) {
        println!("engine: pause");
    }

    async fn on_resume(&self, _handle: &EngineHandle) {
        println!("engine: resume");
    }

    async fn on_touch(&self, _handle: &EngineHandle, x: f32, y: f32, action: TouchAction) {
        println!("engine: touch {x},{y} {action:?}");
    }

    async fn on_key_press(&self, _handle: &EngineHandle, code: i32) {
        println!("engine: key_press {code}");
    }

    async fn on_payment_success(
        &self,
        _handle: &EngineHandle,
        transaction_id: &str,
        amount: Amount,
    ) {
        println!("engine: payment_success {transaction_id} {amount}");
    }

    async fn on_payment_failure(&self, _handle: &EngineHandle, error: &str) {
        println!("engine: payment_failure {error}");
    }
}

/// Payment surface that completes every transaction as soon as it is
/// initiated, with sequential transaction ids, so script replays produce a
/// stable engine stream.
pub struct InstantGateway {
    fail: bool,
    next_id: AtomicU64,
}

impl InstantGateway {
    pub fn new(fail: bool) -> Self {
        Self {
            fail,
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl PaymentSurface for InstantGateway {
    async fn begin_transaction(
        &self,
        token: PaymentToken,
        amount: Amount,
        completer: PaymentCompleter,
    ) {
        if self.fail {
            completer.complete_failure(token, "gateway declined");
        } else {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed);
            completer.complete_success(token, format!("tx-{n}"), amount);
        }
    }
}

/// Prompt that always answers the same way, for unattended replays.
pub struct AutoPrompt {
    answer: bool,
}

impl AutoPrompt {
    pub fn affirmative() -> Self {
        Self { answer: true }
    }

    pub fn negative() -> Self {
        Self { answer: false }
    }
}

#[async_trait]
impl ConfirmationPrompt for AutoPrompt {
    async fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.answer
    }
}

/// Notifier that prints notices to stderr, keeping stdout for the engine
/// stream.
pub struct ConsoleNotifier;

#[async_trait]
impl HostNotifier for ConsoleNotifier {
    async fn notify(&self, message: &str) {
        eprintln!("notice: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Completion;
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_instant_gateway_completes_immediately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let gateway = InstantGateway::new(false);
        let token = PaymentToken::new();
        let amount = Amount::new(dec!(5.00)).unwrap();

        gateway
            .begin_transaction(token, amount, PaymentCompleter::new(tx))
            .await;

        match rx.try_recv().unwrap() {
            Completion::Success {
                token: t,
                transaction_id,
                amount: a,
            } => {
                assert_eq!(t, token);
                assert_eq!(transaction_id, "tx-1");
                assert_eq!(a, amount);
            }
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_instant_gateway_failure_mode() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let gateway = InstantGateway::new(true);
        let token = PaymentToken::new();

        gateway
            .begin_transaction(token, Amount::new(dec!(5.00)).unwrap(), PaymentCompleter::new(tx))
            .await;

        assert!(matches!(
            rx.try_recv().unwrap(),
            Completion::Failure { error, .. } if error == "gateway declined"
        ));
    }
}
