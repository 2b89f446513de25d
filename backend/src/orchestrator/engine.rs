//! Fleet Orchestrator Engine
//!
//! Owns every Device Simulator in a fleet and advances them in lockstep.
//!
//! # Architecture
//!
//! ```text
//! initialize(config):
//! 1. Validate rates
//! 2. Derive one RNG seed per device from the fleet seed (registration order)
//! 3. Construct devices, rejecting duplicate ids
//! 4. Hand each advertisement to the discovery registry
//!
//! tick_all():
//! 1. Tick every device in registration order (powered-off devices no-op)
//! 2. Advance the global tick counter by exactly one
//! ```
//!
//! The engine never schedules itself; a driver calls `tick_all` on its own
//! cadence and commands devices directly through `lookup_by_id_mut`.
//!
//! # Example
//!
//! ```rust
//! use spa_simulator_core_rs::discovery::InMemoryRegistry;
//! use spa_simulator_core_rs::orchestrator::{Fleet, FleetConfig};
//!
//! let mut registry = InMemoryRegistry::new();
//! let mut fleet = Fleet::initialize(FleetConfig::sample(12345), &mut registry).unwrap();
//! assert_eq!(registry.len(), 3);
//!
//! fleet.lookup_by_id_mut("AA:BB:CC:DD:EE:FF").unwrap().power_on();
//! for _ in 0..10 {
//!     let result = fleet.tick_all();
//!     assert_eq!(result.devices_ticked, 1);
//! }
//! assert_eq!(fleet.global_tick_count(), 10);
//! ```

use crate::core::{Clock, SystemClock, TimeManager};
use crate::device::{DeviceSimulator, DeviceSpec, SimulationRates};
use crate::discovery::DiscoveryRegistry;
use crate::models::identity::{ArgumentError, Platform, ProductKind};
use crate::orchestrator::snapshot::FleetSnapshot;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete fleet configuration
///
/// # Fields
///
/// * `rng_seed` - Seed from which every device's RNG is derived
/// * `devices` - One spec per device, in registration order
/// * `rates` - Physical model rates shared by the fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FleetConfig {
    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    /// Per-device specs
    pub devices: Vec<DeviceSpec>,

    /// Physical model rates
    #[serde(default)]
    pub rates: SimulationRates,
}

impl FleetConfig {
    /// The demo fleet: two spas and a cooler
    pub fn sample(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            devices: vec![
                DeviceSpec::new(Platform::Android, ProductKind::Spa, "Luxury Spa", "AA:BB:CC:DD:EE:FF"),
                DeviceSpec::new(Platform::Ios, ProductKind::Spa, "Premium Spa", "11:22:33:44:55:66"),
                DeviceSpec::new(
                    Platform::Android,
                    ProductKind::Cooler,
                    "Arctic Cooler",
                    "99:88:77:66:55:44",
                ),
            ],
            rates: SimulationRates::default(),
        }
    }

    /// Parse a JSON config
    ///
    /// Unknown product kinds, platforms or keys surface as `InvalidConfig`
    /// carrying the parser's message.
    pub fn from_json_str(json: &str) -> Result<Self, FleetError> {
        serde_json::from_str(json).map_err(|e| FleetError::InvalidConfig(e.to_string()))
    }
}

/// Fleet error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FleetError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Structural misuse of a device argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    /// Two devices resolved to the same id
    #[error("Duplicate device ID: {0}")]
    DuplicateDeviceId(String),

    /// No device with this id in the fleet
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}

/// Result of a single fleet advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Global tick that was executed
    pub tick: u64,

    /// Devices that were powered (and so actually evolved) this tick
    pub devices_ticked: usize,

    /// Devices reporting a fault after the tick
    pub devices_faulted: usize,
}

// ============================================================================
// Fleet
// ============================================================================

/// Owner and coordinator of a set of Device Simulators
///
/// Devices keep registration order for the whole run. The fleet mutates only
/// its own registry and tick counter; device state changes only through the
/// device's own methods.
#[derive(Debug)]
pub struct Fleet {
    /// Devices in registration order
    devices: Vec<DeviceSimulator>,

    /// Global tick counter
    time_manager: TimeManager,

    /// Seed the fleet was built from
    rng_seed: u64,

    disposed: bool,
}

impl Fleet {
    /// Build a fleet on the real wall clock
    ///
    /// # Returns
    ///
    /// * `Ok(Fleet)` - Every device constructed and advertised
    /// * `Err(FleetError)` - Validation failed; nothing was advertised
    pub fn initialize(
        config: FleetConfig,
        registry: &mut dyn DiscoveryRegistry,
    ) -> Result<Self, FleetError> {
        Self::initialize_with_clock(config, registry, Arc::new(SystemClock))
    }

    /// Build a fleet whose devices read time from `clock`
    pub fn initialize_with_clock(
        config: FleetConfig,
        registry: &mut dyn DiscoveryRegistry,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, FleetError> {
        Self::validate_config(&config)?;

        let mut seeds = RngManager::new(config.rng_seed);
        let mut ids = HashSet::new();
        let mut devices = Vec::with_capacity(config.devices.len());

        for spec in &config.devices {
            let device = DeviceSimulator::new(
                spec,
                config.rates.clone(),
                RngManager::new(seeds.next()),
                Arc::clone(&clock),
            )?;

            if !ids.insert(device.device_id().to_string()) {
                return Err(FleetError::DuplicateDeviceId(device.device_id().to_string()));
            }
            devices.push(device);
        }

        // Advertise only once the whole fleet is known to be valid
        for device in &devices {
            registry.register_advertisement(device.advertisement());
        }

        info!(
            devices = devices.len(),
            seed = config.rng_seed,
            "fleet initialized"
        );

        Ok(Self {
            devices,
            time_manager: TimeManager::new(),
            rng_seed: config.rng_seed,
            disposed: false,
        })
    }

    /// Validate configuration
    fn validate_config(config: &FleetConfig) -> Result<(), FleetError> {
        config.rates.validate().map_err(FleetError::InvalidConfig)?;

        for spec in &config.devices {
            if spec.name.trim().is_empty() {
                return Err(FleetError::InvalidConfig(
                    "device name must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of completed fleet advances
    pub fn global_tick_count(&self) -> u64 {
        self.time_manager.current_tick()
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Devices in registration order
    pub fn list_all(&self) -> &[DeviceSimulator] {
        &self.devices
    }

    pub fn device_ids(&self) -> Vec<String> {
        self.devices.iter().map(|d| d.device_id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Find a device by id; `None` when absent
    pub fn lookup_by_id(&self, id: &str) -> Option<&DeviceSimulator> {
        self.devices.iter().find(|d| d.device_id() == id)
    }

    /// Mutable lookup, for issuing commands
    pub fn lookup_by_id_mut(&mut self, id: &str) -> Option<&mut DeviceSimulator> {
        self.devices.iter_mut().find(|d| d.device_id() == id)
    }

    /// Mutable lookup that reports absence as `DeviceNotFound`
    pub fn require_device_mut(&mut self, id: &str) -> Result<&mut DeviceSimulator, FleetError> {
        self.lookup_by_id_mut(id)
            .ok_or_else(|| FleetError::DeviceNotFound(id.to_string()))
    }

    /// Point-in-time copy of the whole fleet
    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot::from(self)
    }

    // ========================================================================
    // Tick Loop
    // ========================================================================

    /// Advance every device by one tick, then the global counter by one
    ///
    /// The counter advances even if no device is powered.
    pub fn tick_all(&mut self) -> TickResult {
        let tick = self.time_manager.current_tick();
        let mut devices_ticked = 0;
        let mut devices_faulted = 0;

        for device in &mut self.devices {
            if device.is_powered() && !device.is_disposed() {
                devices_ticked += 1;
            }
            device.tick();
            if device.physical_state().error_condition().is_some() {
                devices_faulted += 1;
            }
        }

        self.time_manager.advance_tick();

        debug!(tick, devices_ticked, devices_faulted, "fleet advanced");

        TickResult {
            tick,
            devices_ticked,
            devices_faulted,
        }
    }

    /// Dispose every device; safe to call repeatedly
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        for device in &mut self.devices {
            device.dispose();
        }
        self.disposed = true;

        info!(
            devices = self.devices.len(),
            ticks = self.global_tick_count(),
            "fleet disposed"
        );
    }
}
