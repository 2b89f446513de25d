//! Orchestrator - fleet ownership and the shared tick
//!
//! See `engine.rs` for full implementation.

pub mod engine;
pub mod snapshot;

// Re-export main types for convenience
pub use engine::{Fleet, FleetConfig, FleetError, TickResult};
pub use snapshot::{DeviceSnapshot, FleetSnapshot};
