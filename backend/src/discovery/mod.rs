//! Discovery collaborator seam
//!
//! The fleet hands each device's advertisement record to a registry exactly
//! once, at initialization. What the registry does with it (mock BLE
//! advertising, a test recorder, nothing) is outside the simulator.

pub mod gatt;

use serde::{Deserialize, Serialize};

/// Identity record as advertised for client discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: String,
    pub display_name: String,
    pub advertised_services: Vec<String>,
    /// Manufacturer-specific data
    pub opaque_payload: Vec<u8>,
    pub connectable: bool,
}

/// Receives advertisement records at fleet initialization
pub trait DiscoveryRegistry {
    fn register_advertisement(&mut self, record: Advertisement);
}

/// Registry that just remembers what it was given, in order
///
/// # Example
/// ```
/// use spa_simulator_core_rs::discovery::{Advertisement, DiscoveryRegistry, InMemoryRegistry};
///
/// let mut registry = InMemoryRegistry::new();
/// registry.register_advertisement(Advertisement {
///     id: "AA:BB:CC:DD:EE:FF".to_string(),
///     display_name: "Luxury Spa".to_string(),
///     advertised_services: vec![],
///     opaque_payload: b"SPA".to_vec(),
///     connectable: true,
/// });
/// assert_eq!(registry.len(), 1);
/// assert!(registry.find("AA:BB:CC:DD:EE:FF").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    records: Vec<Advertisement>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Advertisement] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&Advertisement> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DiscoveryRegistry for InMemoryRegistry {
    fn register_advertisement(&mut self, record: Advertisement) {
        tracing::debug!(id = %record.id, name = %record.display_name, "advertisement registered");
        self.records.push(record);
    }
}

/// Registry that discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRegistry;

impl DiscoveryRegistry for NullRegistry {
    fn register_advertisement(&mut self, _record: Advertisement) {}
}
