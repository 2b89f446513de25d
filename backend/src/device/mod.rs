//! Device simulator - one appliance's identity and physical behavior
//!
//! See `simulator.rs` for the tick rules and command semantics.

pub mod rates;
pub mod simulator;

pub use rates::SimulationRates;
pub use simulator::{DeviceSimulator, DeviceSpec};
