//! Device identity model
//!
//! A device's identity is fixed at construction: its id, display name,
//! product kind and the services it advertises for discovery.
//!
//! # Identifier rule
//!
//! - iOS hosts never expose hardware addresses, so a random UUID-v4 is
//!   generated (drawn from the device's seeded RNG).
//! - Every other platform uses the caller-supplied hardware address verbatim.

use crate::discovery::{gatt, Advertisement};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Structural misuse detected at the boundary
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("Unknown product kind: '{0}' (expected 'spa' or 'cooler')")]
    UnknownProductKind(String),

    #[error("Unknown platform: '{0}' (expected 'ios' or 'android')")]
    UnknownPlatform(String),

    #[error("Invalid jet speed {0}: must be 0, 1, 2 or 3")]
    InvalidJetSpeed(u8),

    #[error("Device '{name}' needs a hardware address on non-iOS platforms")]
    EmptyHardwareAddress { name: String },
}

/// Host platform the simulated device is presented to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl FromStr for Platform {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ios") {
            Ok(Platform::Ios)
        } else if s.eq_ignore_ascii_case("android") {
            Ok(Platform::Android)
        } else {
            Err(ArgumentError::UnknownPlatform(s.to_string()))
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = ArgumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of appliance; gates which commands are legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProductKind {
    Spa,
    Cooler,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Spa => "spa",
            ProductKind::Cooler => "cooler",
        }
    }

    /// Only coolers have refrigeration hardware
    pub fn has_cooler(&self) -> bool {
        matches!(self, ProductKind::Cooler)
    }
}

impl FromStr for ProductKind {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spa" => Ok(ProductKind::Spa),
            "cooler" => Ok(ProductKind::Cooler),
            _ => Err(ArgumentError::UnknownProductKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for ProductKind {
    type Error = ArgumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable identity of one simulated device
///
/// # Example
/// ```
/// use spa_simulator_core_rs::{DeviceIdentity, Platform, ProductKind, RngManager};
///
/// let mut rng = RngManager::new(1);
/// let identity = DeviceIdentity::new(
///     Platform::Android,
///     ProductKind::Spa,
///     "Luxury Spa",
///     "AA:BB:CC:DD:EE:FF",
///     &mut rng,
/// )
/// .unwrap();
/// assert_eq!(identity.device_id(), "AA:BB:CC:DD:EE:FF");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    device_id: String,
    display_name: String,
    product_kind: ProductKind,
    advertised_services: Vec<String>,
}

impl DeviceIdentity {
    /// Build an identity, deriving the id from the platform rule
    ///
    /// # Errors
    /// `EmptyHardwareAddress` when a non-iOS device has a blank address.
    pub fn new(
        platform: Platform,
        product_kind: ProductKind,
        display_name: impl Into<String>,
        hardware_address: &str,
        rng: &mut RngManager,
    ) -> Result<Self, ArgumentError> {
        let display_name = display_name.into();
        let device_id = match platform {
            Platform::Ios => generate_device_uuid(rng),
            Platform::Android => {
                if hardware_address.trim().is_empty() {
                    return Err(ArgumentError::EmptyHardwareAddress { name: display_name });
                }
                hardware_address.to_string()
            }
        };

        Ok(Self {
            device_id,
            display_name,
            product_kind,
            advertised_services: vec![gatt::SERVICE_UUID_OPERATION.to_string()],
        })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn product_kind(&self) -> ProductKind {
        self.product_kind
    }

    pub fn advertised_services(&self) -> &[String] {
        &self.advertised_services
    }

    /// Record handed to the discovery collaborator
    pub fn advertisement(&self) -> Advertisement {
        Advertisement {
            id: self.device_id.clone(),
            display_name: self.display_name.clone(),
            advertised_services: self.advertised_services.clone(),
            opaque_payload: gatt::MANUFACTURER_PAYLOAD.to_vec(),
            connectable: true,
        }
    }
}

/// Random UUID-v4 drawn from the seeded RNG
pub fn generate_device_uuid(rng: &mut RngManager) -> String {
    uuid::Builder::from_random_bytes(rng.next_bytes16())
        .into_uuid()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse_case_insensitive() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("ANDROID".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!(
            "symbian".parse::<Platform>(),
            Err(ArgumentError::UnknownPlatform("symbian".to_string()))
        );
    }

    #[test]
    fn test_unknown_product_kind_rejected() {
        assert_eq!(
            "hottub".parse::<ProductKind>(),
            Err(ArgumentError::UnknownProductKind("hottub".to_string()))
        );
    }

    #[test]
    fn test_generated_uuid_is_v4() {
        let mut rng = RngManager::new(99);
        let id = generate_device_uuid(&mut rng);
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_advertisement_defaults() {
        let mut rng = RngManager::new(5);
        let identity =
            DeviceIdentity::new(Platform::Ios, ProductKind::Cooler, "Arctic", "", &mut rng)
                .unwrap();
        let ad = identity.advertisement();
        assert_eq!(ad.id, identity.device_id());
        assert_eq!(ad.opaque_payload, b"SPA".to_vec());
        assert!(ad.connectable);
        assert_eq!(ad.advertised_services, vec![gatt::SERVICE_UUID_OPERATION]);
    }
}
