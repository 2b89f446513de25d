//! PyO3 wrapper for Fleet
//!
//! # Example (from Python)
//!
//! ```python
//! from spa_simulator._core import Fleet
//!
//! fleet = Fleet.new({
//!     "rng_seed": 12345,
//!     "devices": [
//!         {"platform": "android", "product_kind": "cooler",
//!          "name": "Arctic Cooler", "hardware_address": "99:88:77:66:55:44"},
//!     ],
//! })
//! fleet.power_on("99:88:77:66:55:44")
//! fleet.set_cooler("99:88:77:66:55:44", True)
//! result = fleet.tick_all()
//! print(fleet.get_state("99:88:77:66:55:44")["water_temperature"])
//! ```

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{
    advertisement_to_py, argument_error_to_py, fleet_error_to_py, parse_fleet_config,
    physical_state_to_py, tick_result_to_py,
};
use crate::discovery::InMemoryRegistry;
use crate::models::physical::JetSpeed;
use crate::orchestrator::Fleet;

/// Python wrapper for a simulated fleet
#[pyclass(name = "Fleet")]
pub struct PyFleet {
    inner: Fleet,
    registry: InMemoryRegistry,
}

#[pymethods]
impl PyFleet {
    /// Create a fleet from a configuration dict
    ///
    /// Raises ValueError on malformed or invalid configuration.
    #[staticmethod]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let rust_config = parse_fleet_config(config)?;
        let mut registry = InMemoryRegistry::new();
        let inner = Fleet::initialize(rust_config, &mut registry).map_err(fleet_error_to_py)?;
        Ok(PyFleet { inner, registry })
    }

    /// Advance every device by one tick
    fn tick_all<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let result = self.inner.tick_all();
        tick_result_to_py(py, &result)
    }

    fn global_tick_count(&self) -> u64 {
        self.inner.global_tick_count()
    }

    /// Device ids in registration order
    fn device_ids(&self) -> Vec<String> {
        self.inner.device_ids()
    }

    /// Physical state of one device, or None when the id is unknown
    fn get_state<'py>(&self, py: Python<'py>, device_id: &str) -> PyResult<Option<Bound<'py, PyDict>>> {
        self.inner
            .lookup_by_id(device_id)
            .map(|device| physical_state_to_py(py, device.physical_state()))
            .transpose()
    }

    /// Records handed to discovery at initialization
    fn advertisements<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyList>> {
        let list = PyList::empty_bound(py);
        for record in self.registry.records() {
            list.append(advertisement_to_py(py, record)?)?;
        }
        Ok(list)
    }

    /// Whole fleet as a JSON document
    fn snapshot_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner.snapshot())
            .map_err(|e| PyRuntimeError::new_err(format!("Failed to serialize snapshot: {}", e)))
    }

    // ========================================================================
    // Device Commands (KeyError for unknown ids)
    // ========================================================================

    fn power_on(&mut self, device_id: &str) -> PyResult<()> {
        self.inner
            .require_device_mut(device_id)
            .map_err(fleet_error_to_py)?
            .power_on();
        Ok(())
    }

    fn power_off(&mut self, device_id: &str) -> PyResult<()> {
        self.inner
            .require_device_mut(device_id)
            .map_err(fleet_error_to_py)?
            .power_off();
        Ok(())
    }

    fn set_heater(&mut self, device_id: &str, on: bool) -> PyResult<()> {
        self.inner
            .require_device_mut(device_id)
            .map_err(fleet_error_to_py)?
            .set_heater(on);
        Ok(())
    }

    fn set_cooler(&mut self, device_id: &str, on: bool) -> PyResult<()> {
        self.inner
            .require_device_mut(device_id)
            .map_err(fleet_error_to_py)?
            .set_cooler(on);
        Ok(())
    }

    /// Raises ValueError for speeds outside 0..=3
    fn set_jets(&mut self, device_id: &str, speed: u8) -> PyResult<()> {
        let speed = JetSpeed::try_from(speed).map_err(argument_error_to_py)?;
        self.inner
            .require_device_mut(device_id)
            .map_err(fleet_error_to_py)?
            .set_jets(speed);
        Ok(())
    }

    fn dispose(&mut self) {
        self.inner.dispose();
    }
}
