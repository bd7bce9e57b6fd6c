use super::bridge::NativeBridge;
use super::session::PaymentSession;
use crate::domain::lifecycle::LifecycleState;
use crate::domain::payment::{Amount, PaymentCompleter, PaymentDelivery, PaymentStatus, PaymentToken};
use crate::domain::ports::{
    ConfirmationPromptBox, ExecutionEngineBox, HostNotifierBox, PaymentSurfaceBox, SecurityGateBox,
    TouchAction,
};
use crate::error::{CoreError, Result};
use tracing::{debug, info, warn};

/// The lifecycle state machine.
///
/// Consumes host lifecycle calls, gates them through the security port,
/// merges marshaled payment completions, and drives the native bridge. All
/// methods take `&mut self`: the host adapter owns the one context on which
/// state transitions and engine calls happen, and the borrow checker keeps
/// it that way.
pub struct LifecycleController {
    state: LifecycleState,
    aborted: bool,
    gate: SecurityGateBox,
    prompt: ConfirmationPromptBox,
    notifier: HostNotifierBox,
    bridge: NativeBridge,
    payments: PaymentSession,
}

impl LifecycleController {
    pub fn new(
        gate: SecurityGateBox,
        engine: ExecutionEngineBox,
        surface: PaymentSurfaceBox,
        prompt: ConfirmationPromptBox,
        notifier: HostNotifierBox,
    ) -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            aborted: false,
            gate,
            prompt,
            notifier,
            bridge: NativeBridge::new(engine),
            payments: PaymentSession::new(surface),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// First foreground entry: Uninitialized -> Created, gated by the
    /// one-time security initialization. A failed initialization is
    /// terminal; the engine is never created and the gate never re-run.
    pub async fn on_foreground_init(&mut self) -> Result<()> {
        if self.aborted {
            return Err(CoreError::InitializationFailure);
        }
        if self.state != LifecycleState::Uninitialized {
            warn!(state = %self.state, "ignoring foreground init");
            return Ok(());
        }
        if !self.gate.initialize().await {
            self.aborted = true;
            self.notifier.notify("Security initialization failed").await;
            return Err(CoreError::InitializationFailure);
        }
        self.bridge.on_create().await?;
        self.state = LifecycleState::Created;
        debug!("session created");
        Ok(())
    }

    /// Foreground entry: {Created, Paused} -> Resumed, gated by a fresh
    /// security check every time. A failed check forces teardown.
    pub async fn on_foreground(&mut self) -> Result<()> {
        if !self.state.can_foreground() {
            warn!(state = %self.state, "ignoring foreground");
            return Ok(());
        }
        if !self.gate.perform_check().await {
            self.notifier.notify("Security violation detected").await;
            self.on_teardown().await?;
            return Err(CoreError::SecurityViolation);
        }
        self.state = LifecycleState::Resumed;
        self.bridge.on_resume().await;
        debug!("session resumed");
        // Deliveries queued while backgrounded are released here.
        self.pump_payments().await;
        Ok(())
    }

    /// Background entry: Resumed -> Paused. No gating.
    pub async fn on_background(&mut self) -> Result<()> {
        if self.state != LifecycleState::Resumed {
            warn!(state = %self.state, "ignoring background");
            return Ok(());
        }
        self.state = LifecycleState::Paused;
        self.bridge.on_pause().await;
        debug!("session paused");
        Ok(())
    }

    /// Teardown: any state -> Destroyed. Idempotent; runs to the releasing
    /// destroy within this call and is never delayed by outstanding
    /// payments.
    pub async fn on_teardown(&mut self) -> Result<()> {
        if self.state == LifecycleState::Destroyed {
            return Ok(());
        }
        self.payments.terminate_outstanding();
        self.gate.shutdown().await;
        self.bridge.on_destroy().await;
        self.state = LifecycleState::Destroyed;
        info!("session destroyed");
        Ok(())
    }

    /// Routes an exit request through the confirmation prompt. Teardown
    /// begins only after an affirmative answer; a negative answer leaves
    /// the state untouched. Returns the user's decision.
    pub async fn request_exit(&mut self) -> Result<bool> {
        if self.state == LifecycleState::Destroyed {
            warn!(state = %self.state, "ignoring exit request");
            return Ok(true);
        }
        let confirmed = self
            .prompt
            .confirm("Exit Game", "Are you sure you want to exit?")
            .await;
        if confirmed {
            self.on_teardown().await?;
        }
        Ok(confirmed)
    }

    pub async fn on_touch(&mut self, x: f32, y: f32, action: TouchAction) {
        self.bridge.on_touch(x, y, action).await;
    }

    pub async fn on_key_press(&mut self, code: i32) {
        self.bridge.on_key_press(code).await;
    }

    /// Starts a payment transaction and returns its correlation token.
    pub async fn initiate_payment(&mut self, amount: Amount) -> Result<PaymentToken> {
        if self.state == LifecycleState::Destroyed {
            return Err(CoreError::ValidationError(
                "session already destroyed".to_string(),
            ));
        }
        Ok(self.payments.initiate(amount).await)
    }

    /// Write half of the completion channel, for wiring custom surfaces.
    pub fn payment_completer(&self) -> PaymentCompleter {
        self.payments.completer()
    }

    pub fn payment_status(&self, token: PaymentToken) -> Option<PaymentStatus> {
        self.payments.request(token).map(|r| r.status)
    }

    /// Dispatch tick for marshaled payment completions. Settles whatever
    /// has arrived; deliveries reach the engine only while resumed and stay
    /// queued otherwise.
    pub async fn pump_payments(&mut self) {
        self.payments.drain();
        if self.state != LifecycleState::Resumed {
            return;
        }
        for delivery in self.payments.take_deliveries() {
            match &delivery {
                PaymentDelivery::Success { amount, .. } => {
                    self.notifier
                        .notify(&format!("Payment successful: ${amount}"))
                        .await;
                }
                PaymentDelivery::Failure { error } => {
                    self.notifier
                        .notify(&format!("Payment failed: {error}"))
                        .await;
                }
            }
            self.bridge.deliver_payment(delivery).await;
        }
    }
}
