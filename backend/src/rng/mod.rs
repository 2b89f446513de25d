//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator (ambient drift, fault injection,
//! identifier generation, initial baselines) MUST go through this module.

mod xorshift;

pub use xorshift::RngManager;
