//! Device Simulator
//!
//! Owns one device's identity and physical state, and evolves that state one
//! tick at a time.
//!
//! # State machine
//!
//! ```text
//!            power_on()
//!     Off ───────────────► On
//!      ▲                    │
//!      └────────────────────┘
//!            power_off()
//! ```
//!
//! Every other command, and `tick()`, is a no-op while Off.
//!
//! # Tick order
//!
//! ```text
//! 1. ticks_since_power_on += 1
//! 2. internal_clock = wall time
//! 3. ambient drift
//! 4. water: heat / cool / relax toward ambient
//! 5. fault injection, then fault clearing
//! 6. filtering window
//! ```

use crate::core::{is_filtering_window, Clock};
use crate::device::rates::SimulationRates;
use crate::discovery::Advertisement;
use crate::models::identity::{ArgumentError, DeviceIdentity, Platform, ProductKind};
use crate::models::physical::{Fault, JetFlags, JetSpeed, PhysicalState};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What a caller supplies to create one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSpec {
    pub platform: Platform,
    pub product_kind: ProductKind,
    pub name: String,
    /// Used verbatim as the device id on non-iOS platforms
    #[serde(default)]
    pub hardware_address: String,
}

impl DeviceSpec {
    pub fn new(
        platform: Platform,
        product_kind: ProductKind,
        name: impl Into<String>,
        hardware_address: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            product_kind,
            name: name.into(),
            hardware_address: hardware_address.into(),
        }
    }
}

/// Stateful model of one appliance
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use spa_simulator_core_rs::core::ManualClock;
/// use spa_simulator_core_rs::{
///     DeviceSimulator, DeviceSpec, Platform, ProductKind, RngManager, SimulationRates,
/// };
///
/// let spec = DeviceSpec::new(Platform::Android, ProductKind::Cooler, "Arctic Cooler", "99:88:77:66:55:44");
/// let mut device = DeviceSimulator::new(
///     &spec,
///     SimulationRates::without_faults(),
///     RngManager::new(7),
///     Arc::new(ManualClock::new(1_700_000_000)),
/// )
/// .unwrap();
///
/// device.power_on();
/// device.set_cooler(true);
/// let before = device.physical_state().water_temperature();
/// device.tick();
/// let after = device.physical_state().water_temperature();
/// assert!((before - after - 0.3).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct DeviceSimulator {
    identity: DeviceIdentity,
    state: PhysicalState,
    rates: SimulationRates,
    rng: RngManager,
    clock: Arc<dyn Clock>,
    disposed: bool,
}

impl DeviceSimulator {
    /// Create a powered-off device
    ///
    /// The RNG supplies the generated id (iOS), the baseline temperatures and
    /// all later per-tick randomness.
    ///
    /// # Errors
    /// `EmptyHardwareAddress` for a non-iOS spec without an address.
    pub fn new(
        spec: &DeviceSpec,
        rates: SimulationRates,
        mut rng: RngManager,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ArgumentError> {
        let identity = DeviceIdentity::new(
            spec.platform,
            spec.product_kind,
            spec.name.clone(),
            &spec.hardware_address,
            &mut rng,
        )?;
        let state = PhysicalState::baseline(&mut rng);

        debug!(
            device_id = identity.device_id(),
            kind = %identity.product_kind(),
            ambient = state.ambient_temperature(),
            water = state.water_temperature(),
            "device created"
        );

        Ok(Self {
            identity,
            state,
            rates,
            rng,
            clock,
            disposed: false,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn device_id(&self) -> &str {
        self.identity.device_id()
    }

    pub fn product_kind(&self) -> ProductKind {
        self.identity.product_kind()
    }

    /// Record for the discovery collaborator
    pub fn advertisement(&self) -> Advertisement {
        self.identity.advertisement()
    }

    /// Read-only view of the current physical state
    ///
    /// Clone it to keep a snapshot across later ticks.
    pub fn physical_state(&self) -> &PhysicalState {
        &self.state
    }

    pub fn is_powered(&self) -> bool {
        self.state.power_on
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether a non-power command would take effect right now
    fn accepts_commands(&self) -> bool {
        !self.disposed && self.state.power_on
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Off→On: reset the on-time counter, stamp the internal clock and reopen
    /// the filtering window
    pub fn power_on(&mut self) {
        if self.disposed || self.state.power_on {
            return;
        }

        self.state.power_on = true;
        self.state.ticks_since_power_on = 0;
        self.state.internal_clock = self.clock.now_seconds();
        self.state.filtering_mode_active = is_filtering_window(0);
        debug!(device_id = self.device_id(), "power on");
    }

    /// On→Off: heater and cooler drop out, everything else is frozen
    pub fn power_off(&mut self) {
        if self.disposed || !self.state.power_on {
            return;
        }

        self.state.power_on = false;
        self.state.heater_on = false;
        self.state.cooler_on = false;
        debug!(
            device_id = self.device_id(),
            ticks = self.state.ticks_since_power_on,
            "power off"
        );
    }

    pub fn set_heater(&mut self, on: bool) {
        if !self.accepts_commands() {
            return;
        }

        self.state.heater_on = on;
        if on {
            self.state.cooler_on = false;
        }
        debug!(device_id = self.device_id(), on, "heater set");
    }

    /// Ignored on spa-kind devices
    pub fn set_cooler(&mut self, on: bool) {
        if !self.accepts_commands() || !self.product_kind().has_cooler() {
            return;
        }

        self.state.cooler_on = on;
        if on {
            self.state.heater_on = false;
        }
        debug!(device_id = self.device_id(), on, "cooler set");
    }

    pub fn set_jets(&mut self, speed: JetSpeed) {
        if !self.accepts_commands() {
            return;
        }

        self.state.jets = JetFlags::from_speed(speed);
        debug!(device_id = self.device_id(), speed = speed.level(), "jets set");
    }

    // ========================================================================
    // Time evolution
    // ========================================================================

    /// Advance simulated time by one unit
    pub fn tick(&mut self) {
        if !self.accepts_commands() {
            return;
        }

        self.state.ticks_since_power_on += 1;
        self.state.internal_clock = self.clock.now_seconds();

        self.state.ambient_temperature += self.rng.symmetric(self.rates.ambient_drift);
        self.update_water_temperature();
        self.update_fault();
        self.state.filtering_mode_active = is_filtering_window(self.state.ticks_since_power_on);

        trace!(
            device_id = self.device_id(),
            ticks = self.state.ticks_since_power_on,
            ambient = self.state.ambient_temperature,
            water = self.state.water_temperature,
            filtering = self.state.filtering_mode_active,
            "tick"
        );
    }

    fn update_water_temperature(&mut self) {
        let state = &mut self.state;
        if state.heater_on {
            state.water_temperature += self.rates.heating_per_tick;
        } else if state.cooler_on {
            state.water_temperature -= self.rates.cooling_per_tick;
        } else {
            let gap = state.ambient_temperature - state.water_temperature;
            state.water_temperature += gap * self.rates.relaxation_rate;
        }
    }

    /// Injection is checked first, then clearing; both draw every tick, so a
    /// fault injected this tick can also clear this tick.
    fn update_fault(&mut self) {
        if self.rng.chance(self.rates.fault_injection_probability) {
            let fault = Fault::ALL[self.rng.index(Fault::ALL.len())];
            warn!(device_id = self.device_id(), %fault, "fault injected");
            self.state.error_condition = Some(fault);
        }

        if self.rng.chance(self.rates.fault_clear_probability) {
            if let Some(fault) = self.state.error_condition.take() {
                debug!(device_id = self.device_id(), %fault, "fault cleared");
            }
        }
    }

    /// Release the device; later commands and ticks are ignored
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        debug!(device_id = self.device_id(), "device disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;

    fn spa(seed: u64) -> DeviceSimulator {
        let spec = DeviceSpec::new(Platform::Android, ProductKind::Spa, "Spa", "AA:BB:CC:DD:EE:FF");
        DeviceSimulator::new(
            &spec,
            SimulationRates::without_faults(),
            RngManager::new(seed),
            Arc::new(ManualClock::new(1_000)),
        )
        .unwrap()
    }

    #[test]
    fn test_cooler_ignored_on_spa() {
        let mut device = spa(1);
        device.power_on();
        device.set_cooler(true);
        assert!(!device.physical_state().cooler_on());
    }

    #[test]
    fn test_heater_off_leaves_cooler_alone() {
        let spec = DeviceSpec::new(Platform::Android, ProductKind::Cooler, "C", "01");
        let mut device = DeviceSimulator::new(
            &spec,
            SimulationRates::without_faults(),
            RngManager::new(3),
            Arc::new(ManualClock::new(0)),
        )
        .unwrap();
        device.power_on();
        device.set_cooler(true);
        device.set_heater(false);
        assert!(device.physical_state().cooler_on());
        assert!(!device.physical_state().heater_on());
    }

    #[test]
    fn test_disposed_device_ignores_everything() {
        let mut device = spa(2);
        device.power_on();
        device.dispose();
        device.dispose();
        let frozen = device.physical_state().clone();

        device.tick();
        device.set_heater(true);
        device.power_off();

        assert!(device.is_disposed());
        assert_eq!(device.physical_state(), &frozen);
    }

    #[test]
    fn test_certain_injection_then_certain_clear_same_tick() {
        let spec = DeviceSpec::new(Platform::Android, ProductKind::Spa, "S", "02");
        let rates = SimulationRates {
            fault_injection_probability: 1.0,
            fault_clear_probability: 1.0,
            ..SimulationRates::default()
        };
        let mut device =
            DeviceSimulator::new(&spec, rates, RngManager::new(4), Arc::new(ManualClock::new(0)))
                .unwrap();
        device.power_on();
        device.tick();
        assert_eq!(device.physical_state().error_condition(), None);
    }
}
