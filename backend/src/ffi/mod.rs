//! Python bindings (PyO3)
//!
//! Exposes the fleet driver interface to Python test harnesses.

pub mod fleet;
pub mod types;
