//! Snapshot - point-in-time copy of fleet state
//!
//! Drivers use snapshots to display the fleet without holding a borrow on it.
//! Snapshots are owned copies: mutating one never touches a device.

use crate::device::DeviceSimulator;
use crate::models::identity::DeviceIdentity;
use crate::models::physical::PhysicalState;
use crate::orchestrator::engine::Fleet;
use serde::{Deserialize, Serialize};

/// Complete fleet snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    /// Completed fleet advances at time of snapshot
    pub global_tick_count: u64,

    /// Devices in registration order
    pub devices: Vec<DeviceSnapshot>,
}

/// Device snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub identity: DeviceIdentity,
    pub disposed: bool,
    pub state: PhysicalState,
}

impl From<&DeviceSimulator> for DeviceSnapshot {
    fn from(device: &DeviceSimulator) -> Self {
        DeviceSnapshot {
            identity: device.identity().clone(),
            disposed: device.is_disposed(),
            state: device.physical_state().clone(),
        }
    }
}

impl From<&Fleet> for FleetSnapshot {
    fn from(fleet: &Fleet) -> Self {
        FleetSnapshot {
            global_tick_count: fleet.global_tick_count(),
            devices: fleet.list_all().iter().map(DeviceSnapshot::from).collect(),
        }
    }
}

impl FleetSnapshot {
    pub fn device(&self, id: &str) -> Option<&DeviceSnapshot> {
        self.devices.iter().find(|d| d.identity.device_id() == id)
    }

    pub fn powered_count(&self) -> usize {
        self.devices.iter().filter(|d| d.state.power_on()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::NullRegistry;
    use crate::orchestrator::FleetConfig;

    #[test]
    fn test_snapshot_is_detached_from_fleet() {
        let mut fleet = Fleet::initialize(FleetConfig::sample(77), &mut NullRegistry).unwrap();
        let before = fleet.snapshot();

        fleet.lookup_by_id_mut("AA:BB:CC:DD:EE:FF").unwrap().power_on();
        fleet.tick_all();

        assert_eq!(before.global_tick_count, 0);
        assert_eq!(before.powered_count(), 0);
        assert_eq!(fleet.snapshot().powered_count(), 1);
    }

    #[test]
    fn test_snapshot_serializes_fault_as_text() {
        let fleet = Fleet::initialize(FleetConfig::sample(3), &mut NullRegistry).unwrap();
        let json = serde_json::to_value(fleet.snapshot()).unwrap();
        assert_eq!(json["devices"][0]["identity"]["product_kind"], "spa");
        assert!(json["devices"][0]["state"]["error_condition"].is_null());
    }

    #[test]
    fn test_snapshot_device_lookup_by_id() {
        let mut fleet = Fleet::initialize(FleetConfig::sample(11), &mut NullRegistry).unwrap();
        assert_eq!(fleet.rng_seed(), 11);
        fleet.lookup_by_id_mut("99:88:77:66:55:44").unwrap().power_on();

        let snapshot = fleet.snapshot();
        let cooler = snapshot.device("99:88:77:66:55:44").unwrap();
        assert_eq!(cooler.identity.display_name(), "Arctic Cooler");
        assert!(cooler.state.power_on());
        assert!(!snapshot.device("AA:BB:CC:DD:EE:FF").unwrap().state.power_on());
        assert!(snapshot.device("00:00:00:00:00:00").is_none());
    }
}
