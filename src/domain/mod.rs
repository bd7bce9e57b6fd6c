pub mod lifecycle;
pub mod payment;
pub mod ports;
