//! Spa Simulator Core - Rust Engine
//!
//! Simulates a fleet of networked spa/cooler appliances for client
//! development and testing, standing in for real devices.
//!
//! # Architecture
//!
//! - **core**: Tick counting, filtering schedule, wall clock
//! - **models**: Domain types (identity, physical state, faults, jets)
//! - **device**: Device simulator (commands + tick rules) and rates
//! - **orchestrator**: Fleet ownership, lockstep advance, snapshots
//! - **discovery**: Advertisement records and the registry seam
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Heater and cooler are never on together; only coolers cool
//! 2. All randomness is deterministic (seeded RNG per device)
//! 3. The core never schedules itself; drivers call `tick_all`

// Module declarations
pub mod core;
pub mod device;
pub mod discovery;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use crate::core::time::TimeManager;
pub use device::{DeviceSimulator, DeviceSpec, SimulationRates};
pub use discovery::{Advertisement, DiscoveryRegistry, InMemoryRegistry};
pub use models::{
    identity::{ArgumentError, DeviceIdentity, Platform, ProductKind},
    physical::{Fault, JetFlags, JetSpeed, PhysicalState},
};
pub use orchestrator::{DeviceSnapshot, Fleet, FleetConfig, FleetError, FleetSnapshot, TickResult};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn spa_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::fleet::PyFleet>()?;
    Ok(())
}
