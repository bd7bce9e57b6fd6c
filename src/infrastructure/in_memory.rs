use crate::domain::lifecycle::EngineHandle;
use crate::domain::payment::{Amount, PaymentCompleter, PaymentToken};
use crate::domain::ports::{
    ConfirmationPrompt, ExecutionEngine, HostNotifier, PaymentSurface, SecurityGate, TouchAction,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// One forwarded engine call, as observed by `RecordingEngine`.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Create(u64),
    Destroy(u64),
    Pause,
    Resume,
    Touch { x: f32, y: f32, action: TouchAction },
    KeyPress(i32),
    PaymentSuccess { transaction_id: String, amount: Amount },
    PaymentFailure(String),
}

/// Execution engine that records every call it receives, in order.
///
/// Uses `Arc<Mutex<Vec<EngineCall>>>` so tests can keep a clone and
/// inspect the stream after driving the controller.
#[derive(Default, Clone)]
pub struct RecordingEngine {
    calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: EngineCall) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl ExecutionEngine for RecordingEngine {
    async fn on_create(&self, handle: &EngineHandle) {
        self.record(EngineCall::Create(handle.id())).await;
    }

    async fn on_destroy(&self, handle: &EngineHandle) {
        self.record(EngineCall::Destroy(handle.id())).await;
    }

    async fn on_pause(&self, _handle: &EngineHandle) {
        self.record(EngineCall::Pause).await;
    }

    async fn on_resume(&self, _handle: &EngineHandle) {
        self.record(EngineCall::Resume).await;
    }

    async fn on_touch(&self, _handle: &EngineHandle, x: f32, y: f32, action: TouchAction) {
        self.record(EngineCall::Touch { x, y, action }).await;
    }

    async fn on_key_press(&self, _handle: &EngineHandle, code: i32) {
        self.record(EngineCall::KeyPress(code)).await;
    }

    async fn on_payment_success(
        &self,
        _handle: &EngineHandle,
        transaction_id: &str,
        amount: Amount,
    ) {
        self.record(EngineCall::PaymentSuccess {
            transaction_id: transaction_id.to_string(),
            amount,
        })
        .await;
    }

    async fn on_payment_failure(&self, _handle: &EngineHandle, error: &str) {
        self.record(EngineCall::PaymentFailure(error.to_string()))
            .await;
    }
}

/// Security gate with fixed verdicts and call counters.
///
/// The check verdict can be flipped at runtime to simulate tampering
/// detected while the application was backgrounded.
#[derive(Clone)]
pub struct StaticGate {
    init_ok: bool,
    check_ok: Arc<AtomicBool>,
    init_calls: Arc<AtomicUsize>,
    check_calls: Arc<AtomicUsize>,
    shutdown_calls: Arc<AtomicUsize>,
}

impl StaticGate {
    pub fn passing() -> Self {
        Self::with_init(true)
    }

    pub fn denying_init() -> Self {
        Self::with_init(false)
    }

    fn with_init(init_ok: bool) -> Self {
        Self {
            init_ok,
            check_ok: Arc::new(AtomicBool::new(true)),
            init_calls: Arc::new(AtomicUsize::new(0)),
            check_calls: Arc::new(AtomicUsize::new(0)),
            shutdown_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn deny_checks(&self) {
        self.check_ok.store(false, Ordering::SeqCst);
    }

    pub fn allow_checks(&self) {
        self.check_ok.store(true, Ordering::SeqCst);
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub fn shutdown_calls(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecurityGate for StaticGate {
    async fn initialize(&self) -> bool {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.init_ok
    }

    async fn perform_check(&self) -> bool {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        self.check_ok.load(Ordering::SeqCst)
    }

    async fn shutdown(&self) {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Payment surface that records initiations and completes nothing; tests
/// drive completions through a `PaymentCompleter` themselves.
#[derive(Default, Clone)]
pub struct RecordingSurface {
    initiated: Arc<Mutex<Vec<(PaymentToken, Amount)>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn initiated(&self) -> Vec<(PaymentToken, Amount)> {
        self.initiated.lock().await.clone()
    }
}

#[async_trait]
impl PaymentSurface for RecordingSurface {
    async fn begin_transaction(
        &self,
        token: PaymentToken,
        amount: Amount,
        _completer: PaymentCompleter,
    ) {
        self.initiated.lock().await.push((token, amount));
    }
}

/// Confirmation prompt with a scripted answer and a shown counter.
#[derive(Clone)]
pub struct ScriptedPrompt {
    answer: Arc<AtomicBool>,
    shown: Arc<AtomicUsize>,
}

impl ScriptedPrompt {
    pub fn affirmative() -> Self {
        Self::with_answer(true)
    }

    pub fn negative() -> Self {
        Self::with_answer(false)
    }

    fn with_answer(answer: bool) -> Self {
        Self {
            answer: Arc::new(AtomicBool::new(answer)),
            shown: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_answer(&self, answer: bool) {
        self.answer.store(answer, Ordering::SeqCst);
    }

    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationPrompt for ScriptedPrompt {
    async fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.answer.load(Ordering::SeqCst)
    }
}

/// Notifier that collects every notice for later assertion.
#[derive(Default, Clone)]
pub struct CollectingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<String> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl HostNotifier for CollectingNotifier {
    async fn notify(&self, message: &str) {
        self.messages.lock().await.push(message.to_string());
    }
}
