//! Simulation Rates
//!
//! Per-tick constants driving the physical model. The defaults reproduce the
//! reference appliance behavior; fleets may override them for scenarios.

use serde::{Deserialize, Serialize};

/// Simulation rate configuration
///
/// All temperatures in °C, all probabilities per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationRates {
    /// Maximum ambient drift per tick, in either direction
    pub ambient_drift: f64,

    /// Water temperature gain per tick while heating
    pub heating_per_tick: f64,

    /// Water temperature loss per tick while cooling
    pub cooling_per_tick: f64,

    /// Fraction of the water/ambient gap closed per idle tick
    ///
    /// Must stay within [0, 1] so relaxation never overshoots ambient.
    pub relaxation_rate: f64,

    /// Probability that a fault is injected on a tick
    pub fault_injection_probability: f64,

    /// Probability that the current fault clears on a tick
    pub fault_clear_probability: f64,
}

impl Default for SimulationRates {
    fn default() -> Self {
        Self {
            ambient_drift: 0.05,
            heating_per_tick: 0.2,
            cooling_per_tick: 0.3,
            relaxation_rate: 0.01,
            fault_injection_probability: 0.01,
            fault_clear_probability: 0.10,
        }
    }
}

impl SimulationRates {
    /// Rates with fault dynamics disabled (useful for scripted scenarios)
    pub fn without_faults() -> Self {
        Self {
            fault_injection_probability: 0.0,
            fault_clear_probability: 0.0,
            ..Self::default()
        }
    }

    /// Check ranges, returning a description of the first violation
    pub fn validate(&self) -> Result<(), String> {
        let magnitudes = [
            ("ambient_drift", self.ambient_drift),
            ("heating_per_tick", self.heating_per_tick),
            ("cooling_per_tick", self.cooling_per_tick),
        ];
        for (name, value) in magnitudes {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, value));
            }
        }

        let unit_interval = [
            ("relaxation_rate", self.relaxation_rate),
            ("fault_injection_probability", self.fault_injection_probability),
            ("fault_clear_probability", self.fault_clear_probability),
        ];
        for (name, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be within [0, 1], got {}", name, value));
            }
        }

        Ok(())
    }
}
