use rust_decimal::Decimal;
use slotcore::application::controller::LifecycleController;
use slotcore::domain::payment::Amount;
use slotcore::infrastructure::in_memory::{
    CollectingNotifier, RecordingEngine, RecordingSurface, ScriptedPrompt, StaticGate,
};

pub struct Harness {
    pub controller: LifecycleController,
    pub engine: RecordingEngine,
    pub gate: StaticGate,
    pub surface: RecordingSurface,
    pub prompt: ScriptedPrompt,
    pub notifier: CollectingNotifier,
}

pub fn harness() -> Harness {
    harness_with_gate(StaticGate::passing())
}

pub fn harness_with_gate(gate: StaticGate) -> Harness {
    let engine = RecordingEngine::new();
    let surface = RecordingSurface::new();
    let prompt = ScriptedPrompt::affirmative();
    let notifier = CollectingNotifier::new();
    let controller = LifecycleController::new(
        Box::new(gate.clone()),
        Box::new(engine.clone()),
        Box::new(surface.clone()),
        Box::new(prompt.clone()),
        Box::new(notifier.clone()),
    );
    Harness {
        controller,
        engine,
        gate,
        surface,
        prompt,
        notifier,
    }
}

pub fn amount(value: Decimal) -> Amount {
    Amount::new(value).expect("test amount must be positive")
}
