//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::device::{DeviceSpec, SimulationRates};
use crate::discovery::Advertisement;
use crate::models::identity::{ArgumentError, Platform, ProductKind};
use crate::models::physical::PhysicalState;
use crate::orchestrator::{FleetConfig, FleetError, TickResult};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract a field with a default value if missing.
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

// ========================================================================
// Error Mapping
// ========================================================================

pub fn argument_error_to_py(err: ArgumentError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Unknown devices raise `KeyError`; everything else is a `ValueError`
pub fn fleet_error_to_py(err: FleetError) -> PyErr {
    match err {
        FleetError::DeviceNotFound(id) => PyKeyError::new_err(id),
        other => PyValueError::new_err(other.to_string()),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to FleetConfig
///
/// ```python
/// {
///     "rng_seed": 42,
///     "devices": [
///         {"platform": "android", "product_kind": "spa",
///          "name": "Luxury Spa", "hardware_address": "AA:BB:CC:DD:EE:FF"},
///     ],
///     "rates": {"heating_per_tick": 0.5},   # optional, partial
/// }
/// ```
pub fn parse_fleet_config(py_config: &Bound<'_, PyDict>) -> PyResult<FleetConfig> {
    let rng_seed: u64 = extract_required(py_config, "rng_seed")?;

    let py_devices: Bound<'_, PyList> = py_config
        .get_item("devices")?
        .ok_or_else(|| PyValueError::new_err("Missing required field 'devices'"))?
        .downcast_into()?;

    let mut devices = Vec::with_capacity(py_devices.len());
    for py_device in py_devices.iter() {
        let device_dict: Bound<'_, PyDict> = py_device.downcast_into()?;
        devices.push(parse_device_spec(&device_dict)?);
    }

    let rates = match py_config.get_item("rates")? {
        Some(py_rates) => {
            let rates_dict: Bound<'_, PyDict> = py_rates.downcast_into()?;
            parse_rates(&rates_dict)?
        }
        None => SimulationRates::default(),
    };

    Ok(FleetConfig {
        rng_seed,
        devices,
        rates,
    })
}

fn parse_device_spec(dict: &Bound<'_, PyDict>) -> PyResult<DeviceSpec> {
    let platform: String = extract_required(dict, "platform")?;
    let product_kind: String = extract_required(dict, "product_kind")?;
    let name: String = extract_required(dict, "name")?;
    let hardware_address: String = extract_with_default(dict, "hardware_address", String::new())?;

    Ok(DeviceSpec {
        platform: platform.parse::<Platform>().map_err(argument_error_to_py)?,
        product_kind: product_kind
            .parse::<ProductKind>()
            .map_err(argument_error_to_py)?,
        name,
        hardware_address,
    })
}

fn parse_rates(dict: &Bound<'_, PyDict>) -> PyResult<SimulationRates> {
    let defaults = SimulationRates::default();
    Ok(SimulationRates {
        ambient_drift: extract_with_default(dict, "ambient_drift", defaults.ambient_drift)?,
        heating_per_tick: extract_with_default(dict, "heating_per_tick", defaults.heating_per_tick)?,
        cooling_per_tick: extract_with_default(dict, "cooling_per_tick", defaults.cooling_per_tick)?,
        relaxation_rate: extract_with_default(dict, "relaxation_rate", defaults.relaxation_rate)?,
        fault_injection_probability: extract_with_default(
            dict,
            "fault_injection_probability",
            defaults.fault_injection_probability,
        )?,
        fault_clear_probability: extract_with_default(
            dict,
            "fault_clear_probability",
            defaults.fault_clear_probability,
        )?,
    })
}

// ========================================================================
// Result Converters
// ========================================================================

pub fn tick_result_to_py<'py>(py: Python<'py>, result: &TickResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("tick", result.tick)?;
    dict.set_item("devices_ticked", result.devices_ticked)?;
    dict.set_item("devices_faulted", result.devices_faulted)?;
    Ok(dict)
}

pub fn physical_state_to_py<'py>(
    py: Python<'py>,
    state: &PhysicalState,
) -> PyResult<Bound<'py, PyDict>> {
    let jets = state.jets();
    let dict = PyDict::new_bound(py);
    dict.set_item("power_on", state.power_on())?;
    dict.set_item("ambient_temperature", state.ambient_temperature())?;
    dict.set_item("water_temperature", state.water_temperature())?;
    dict.set_item("heater_on", state.heater_on())?;
    dict.set_item("cooler_on", state.cooler_on())?;
    dict.set_item("jets", (jets.speed1, jets.speed2, jets.speed3))?;
    dict.set_item("jet_speed", jets.speed().level())?;
    dict.set_item("filtering_mode_active", state.filtering_mode_active())?;
    dict.set_item("error", state.error_condition().map(|f| f.as_str()))?;
    dict.set_item("internal_clock", state.internal_clock())?;
    dict.set_item("ticks_since_power_on", state.ticks_since_power_on())?;
    Ok(dict)
}

pub fn advertisement_to_py<'py>(
    py: Python<'py>,
    record: &Advertisement,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("id", &record.id)?;
    dict.set_item("name", &record.display_name)?;
    dict.set_item("service_uuids", record.advertised_services.clone())?;
    dict.set_item("manufacturer_data", record.opaque_payload.clone())?;
    dict.set_item("is_connectable", record.connectable)?;
    Ok(dict)
}
