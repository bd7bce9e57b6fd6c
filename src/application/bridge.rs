use crate::domain::lifecycle::EngineHandle;
use crate::domain::payment::PaymentDelivery;
use crate::domain::ports::{ExecutionEngineBox, TouchAction};
use crate::error::{CoreError, Result};
use tracing::debug;

/// Strictly-ordered forwarding surface over the execution engine.
///
/// Owns the single `EngineHandle`. Every method takes `&mut self`, so no
/// two engine calls can ever execute concurrently. Calls made while no
/// handle is live are silently dropped.
pub struct NativeBridge {
    engine: ExecutionEngineBox,
    handle: Option<EngineHandle>,
    issued: bool,
}

impl NativeBridge {
    pub fn new(engine: ExecutionEngineBox) -> Self {
        Self {
            engine,
            handle: None,
            issued: false,
        }
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Creates the engine handle and forwards `on_create`. At most one
    /// handle is ever issued per bridge.
    pub async fn on_create(&mut self) -> Result<()> {
        if self.issued {
            return Err(CoreError::ValidationError(
                "engine handle already issued".to_string(),
            ));
        }
        let handle = EngineHandle::new();
        debug!(handle = handle.id(), "engine created");
        self.engine.on_create(&handle).await;
        self.handle = Some(handle);
        self.issued = true;
        Ok(())
    }

    /// Releases the handle and forwards `on_destroy`, exactly once. `take`
    /// guarantees no engine call can follow against the released handle.
    pub async fn on_destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!(handle = handle.id(), "engine destroyed");
            self.engine.on_destroy(&handle).await;
        }
    }

    pub async fn on_pause(&mut self) {
        if let Some(handle) = &self.handle {
            self.engine.on_pause(handle).await;
        }
    }

    pub async fn on_resume(&mut self) {
        if let Some(handle) = &self.handle {
            self.engine.on_resume(handle).await;
        }
    }

    pub async fn on_touch(&mut self, x: f32, y: f32, action: TouchAction) {
        if let Some(handle) = &self.handle {
            self.engine.on_touch(handle, x, y, action).await;
        }
    }

    pub async fn on_key_press(&mut self, code: i32) {
        if let Some(handle) = &self.handle {
            self.engine.on_key_press(handle, code).await;
        }
    }

    pub async fn deliver_payment(&mut self, delivery: PaymentDelivery) {
        if let Some(handle) = &self.handle {
            match delivery {
                PaymentDelivery::Success {
                    transaction_id,
                    amount,
                } => {
                    self.engine
                        .on_payment_success(handle, &transaction_id, amount)
                        .await;
                }
                PaymentDelivery::Failure { error } => {
                    self.engine.on_payment_failure(handle, &error).await;
                }
            }
        }
    }
}
