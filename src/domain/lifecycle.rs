use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The controller's position in the host lifecycle.
///
/// Exactly one instance exists per session, owned by the
/// `LifecycleController` and mutated only through its `&mut self` methods.
/// `Destroyed` is terminal.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Uninitialized,
    Created,
    Resumed,
    Paused,
    Destroyed,
}

impl LifecycleState {
    /// States in which a live engine handle exists.
    pub fn engine_live(self) -> bool {
        matches!(
            self,
            LifecycleState::Created | LifecycleState::Resumed | LifecycleState::Paused
        )
    }

    /// States from which the host may bring the session into the foreground.
    pub fn can_foreground(self) -> bool {
        matches!(self, LifecycleState::Created | LifecycleState::Paused)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Created => "created",
            LifecycleState::Resumed => "resumed",
            LifecycleState::Paused => "paused",
            LifecycleState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle to a live execution engine instance.
///
/// Deliberately neither `Clone` nor `Copy`: the `NativeBridge` holds the
/// only instance and consumes it on destroy, so no engine call can ever
/// observe a released handle.
#[derive(Debug, PartialEq, Eq)]
pub struct EngineHandle {
    id: u64,
}

impl EngineHandle {
    pub(crate) fn new() -> Self {
        Self {
            id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}
