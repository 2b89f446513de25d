//! Domain models for the spa simulator

pub mod identity;
pub mod physical;

// Re-exports
pub use identity::{ArgumentError, DeviceIdentity, Platform, ProductKind};
pub use physical::{Fault, JetFlags, JetSpeed, PhysicalState};
