//! Physical state model
//!
//! The observable attributes of a device: power, temperatures, heater/cooler,
//! jets, filtering, faults and the tick/clock bookkeeping.
//!
//! # Critical Invariants
//!
//! 1. `heater_on` and `cooler_on` are never both true
//! 2. `cooler_on` is only ever true on cooler-kind devices
//! 3. `ticks_since_power_on` only advances while powered
//!
//! Fields are crate-private; only the owning `DeviceSimulator` writes them.

use crate::models::identity::ArgumentError;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated fault reported on the state snapshot
///
/// Faults are data, not failures: callers observe them and decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fault {
    #[serde(rename = "Low water level")]
    LowWaterLevel,
    #[serde(rename = "Heater fault")]
    HeaterFault,
    #[serde(rename = "Sensor error")]
    SensorError,
    #[serde(rename = "Pump failure")]
    PumpFailure,
}

impl Fault {
    /// Vocabulary that fault injection draws from, uniformly
    pub const ALL: [Fault; 4] = [
        Fault::LowWaterLevel,
        Fault::HeaterFault,
        Fault::SensorError,
        Fault::PumpFailure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fault::LowWaterLevel => "Low water level",
            Fault::HeaterFault => "Heater fault",
            Fault::SensorError => "Sensor error",
            Fault::PumpFailure => "Pump failure",
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested jet speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum JetSpeed {
    Off = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl JetSpeed {
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for JetSpeed {
    type Error = ArgumentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(JetSpeed::Off),
            1 => Ok(JetSpeed::Low),
            2 => Ok(JetSpeed::Medium),
            3 => Ok(JetSpeed::High),
            other => Err(ArgumentError::InvalidJetSpeed(other)),
        }
    }
}

impl From<JetSpeed> for u8 {
    fn from(speed: JetSpeed) -> Self {
        speed.level()
    }
}

/// Jet speed as three "at least speed N" flags
///
/// # Example
/// ```
/// use spa_simulator_core_rs::{JetFlags, JetSpeed};
///
/// let flags = JetFlags::from_speed(JetSpeed::Medium);
/// assert_eq!((flags.speed1, flags.speed2, flags.speed3), (true, true, false));
/// assert_eq!(flags.speed(), JetSpeed::Medium);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JetFlags {
    pub speed1: bool,
    pub speed2: bool,
    pub speed3: bool,
}

impl JetFlags {
    pub fn from_speed(speed: JetSpeed) -> Self {
        let level = speed.level();
        Self {
            speed1: level >= 1,
            speed2: level >= 2,
            speed3: level >= 3,
        }
    }

    /// Highest level whose flag is set
    pub fn speed(&self) -> JetSpeed {
        if self.speed3 {
            JetSpeed::High
        } else if self.speed2 {
            JetSpeed::Medium
        } else if self.speed1 {
            JetSpeed::Low
        } else {
            JetSpeed::Off
        }
    }
}

/// Mutable physical state of one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalState {
    pub(crate) power_on: bool,
    /// °C
    pub(crate) ambient_temperature: f64,
    /// °C
    pub(crate) water_temperature: f64,
    pub(crate) heater_on: bool,
    pub(crate) cooler_on: bool,
    pub(crate) jets: JetFlags,
    pub(crate) filtering_mode_active: bool,
    pub(crate) error_condition: Option<Fault>,
    /// Wall-clock seconds, resynced on power-on and every powered tick
    pub(crate) internal_clock: i64,
    pub(crate) ticks_since_power_on: u64,
}

impl PhysicalState {
    /// Powered-off baseline with randomized temperatures
    ///
    /// Ambient is drawn from [20, 25) °C, water from [15, 25) °C.
    pub fn baseline(rng: &mut RngManager) -> Self {
        let ambient_temperature = rng.range_f64(20.0, 25.0);
        let water_temperature = rng.range_f64(15.0, 25.0);
        Self {
            power_on: false,
            ambient_temperature,
            water_temperature,
            heater_on: false,
            cooler_on: false,
            jets: JetFlags::default(),
            filtering_mode_active: false,
            error_condition: None,
            internal_clock: 0,
            ticks_since_power_on: 0,
        }
    }

    pub fn power_on(&self) -> bool {
        self.power_on
    }

    pub fn ambient_temperature(&self) -> f64 {
        self.ambient_temperature
    }

    pub fn water_temperature(&self) -> f64 {
        self.water_temperature
    }

    pub fn heater_on(&self) -> bool {
        self.heater_on
    }

    pub fn cooler_on(&self) -> bool {
        self.cooler_on
    }

    pub fn jets(&self) -> JetFlags {
        self.jets
    }

    pub fn filtering_mode_active(&self) -> bool {
        self.filtering_mode_active
    }

    pub fn error_condition(&self) -> Option<Fault> {
        self.error_condition
    }

    pub fn internal_clock(&self) -> i64 {
        self.internal_clock
    }

    pub fn ticks_since_power_on(&self) -> u64 {
        self.ticks_since_power_on
    }
}
