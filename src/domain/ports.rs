use super::lifecycle::EngineHandle;
use super::payment::{Amount, PaymentCompleter, PaymentToken};
use async_trait::async_trait;
use serde::Deserialize;

/// Touch phases as reported by the display surface, forwarded verbatim.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TouchAction {
    Down,
    Up,
    Move,
}

/// Security subsystem verification gates.
#[async_trait]
pub trait SecurityGate: Send + Sync {
    /// One-time startup validation; may be arbitrarily expensive. Called
    /// exactly once, before the engine is ever created.
    async fn initialize(&self) -> bool;

    /// Stateless re-validation, called fresh on every foreground
    /// transition. The verdict is never cached.
    async fn perform_check(&self) -> bool;

    /// Idempotent resource release.
    async fn shutdown(&self);
}

/// The native execution engine consuming the ordered event stream.
///
/// Every call carries a reference to the live handle; `on_destroy` is the
/// last call ever issued against a given handle.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    async fn on_create(&self, handle: &EngineHandle);
    async fn on_destroy(&self, handle: &EngineHandle);
    async fn on_pause(&self, handle: &EngineHandle);
    async fn on_resume(&self, handle: &EngineHandle);
    async fn on_touch(&self, handle: &EngineHandle, x: f32, y: f32, action: TouchAction);
    async fn on_key_press(&self, handle: &EngineHandle, code: i32);
    async fn on_payment_success(&self, handle: &EngineHandle, transaction_id: &str, amount: Amount);
    async fn on_payment_failure(&self, handle: &EngineHandle, error: &str);
}

/// External payment gateway surface.
#[async_trait]
pub trait PaymentSurface: Send + Sync {
    /// Begins a transaction for `amount` tagged with `token`. The surface
    /// reports the outcome through `completer` at most once, possibly from
    /// its own thread.
    async fn begin_transaction(&self, token: PaymentToken, amount: Amount, completer: PaymentCompleter);
}

/// Yes/no prompt presented by the host UI.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Resolves with the user's answer; exactly one answer per prompt.
    async fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Sink for user-visible notices (toasts, status lines, and the like).
#[async_trait]
pub trait HostNotifier: Send + Sync {
    async fn notify(&self, message: &str);
}

pub type SecurityGateBox = Box<dyn SecurityGate>;
pub type ExecutionEngineBox = Box<dyn ExecutionEngine>;
pub type PaymentSurfaceBox = Box<dyn PaymentSurface>;
pub type ConfirmationPromptBox = Box<dyn ConfirmationPrompt>;
pub type HostNotifierBox = Box<dyn HostNotifier>;
