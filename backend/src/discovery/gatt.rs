//! GATT identifiers published by the spa firmware
//!
//! Simulated devices advertise only the operation service; the characteristic
//! catalog is exported so client-side test code can address the same
//! characteristics the real hardware exposes.

/// Primary operation service
pub const SERVICE_UUID_OPERATION: &str = "c5a092a5-2202-4ac6-8734-2e8ff796094d";

pub const CHARACTERISTIC_UUID_KEYBOARD: &str = "12ead13c-4d06-48b7-a3f9-cdf725acdd87";
pub const CHARACTERISTIC_UUID_TEMPERATURE: &str = "0daecf8f-2352-4ae8-bdb8-4ae862f041e3";
pub const CHARACTERISTIC_UUID_TIME: &str = "8cea517c-2d76-4190-ae05-2e222a3caacb";
pub const CHARACTERISTIC_UUID_SESSION: &str = "c67c0b5f-0f50-44fc-a0f9-449ff1f476f1";
pub const CHARACTERISTIC_UUID_DISPLAY: &str = "30105eb3-19dc-4621-a227-a917b43162a6";
pub const CHARACTERISTIC_UUID_WIFICREDS: &str = "5eb76cac-ada4-43c2-9ed0-b80547542e9f";
pub const CHARACTERISTIC_UUID_VERSION: &str = "207da212-c2fd-43b5-9664-ac15166364d2";
pub const CHARACTERISTIC_UUID_WIFIMAC: &str = "aefc6b90-26f1-4842-b720-3d47f4a087cf";
pub const CHARACTERISTIC_UUID_MMODE: &str = "984cdbfb-446b-43b2-a879-c857a9a0f638";
pub const CHARACTERISTIC_UUID_MCODE: &str = "6436e996-e573-4ff7-83fd-d0ea0bd09458";
pub const CHARACTERISTIC_UUID_BTNAME: &str = "f8733ee9-6e45-485a-a8a1-9e4e8bdb0536";
pub const CHARACTERISTIC_UUID_CRAS: &str = "71d67ace-65d6-4d28-b08f-f54735e7d50c";

/// Operation service followed by every characteristic, in firmware order
pub const SPA_SERVICE_UUIDS: [&str; 13] = [
    SERVICE_UUID_OPERATION,
    CHARACTERISTIC_UUID_KEYBOARD,
    CHARACTERISTIC_UUID_TEMPERATURE,
    CHARACTERISTIC_UUID_TIME,
    CHARACTERISTIC_UUID_SESSION,
    CHARACTERISTIC_UUID_DISPLAY,
    CHARACTERISTIC_UUID_WIFICREDS,
    CHARACTERISTIC_UUID_VERSION,
    CHARACTERISTIC_UUID_WIFIMAC,
    CHARACTERISTIC_UUID_MMODE,
    CHARACTERISTIC_UUID_MCODE,
    CHARACTERISTIC_UUID_BTNAME,
    CHARACTERISTIC_UUID_CRAS,
];

/// Manufacturer data: ASCII "SPA"
pub const MANUFACTURER_PAYLOAD: &[u8] = &[0x53, 0x50, 0x41];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_entries_are_distinct_uuids() {
        let mut seen = HashSet::new();
        for id in SPA_SERVICE_UUIDS {
            assert!(uuid::Uuid::parse_str(id).is_ok(), "{} is not a UUID", id);
            assert!(seen.insert(id), "{} listed twice", id);
        }
    }
}
