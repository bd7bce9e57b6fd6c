//! Orchestration layer: the lifecycle state machine and the two components
//! it drives, the engine forwarding bridge and the payment session.

pub mod bridge;
pub mod controller;
pub mod session;
