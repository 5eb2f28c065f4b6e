//! Table (fixture) Model
//!
//! A fixture is a physical display unit in a store. Its placed devices and
//! price tags are stored as JSON columns on the fixture row.

use serde::{Deserialize, Serialize};

use super::device::DeviceKind;

/// Fixture layout type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum FixtureType {
    #[default]
    Singolo,
    DoppioBackToBack,
    DoppioFreeStanding,
    Test,
}

/// A device placed on a fixture (snapshot of the catalog entry at placement)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedDevice {
    pub device_id: i64,
    pub name: String,
    pub kind: DeviceKind,
    pub position: i32,
    pub color: Option<String>,
    pub quantity: i32,
}

/// Placement request for a single device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedDeviceInput {
    pub device_id: i64,
    pub position: i32,
    pub color: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Price tag origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PriceTagSource {
    Manual,
    Auto,
}

/// Price tag descriptor attached to a fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTagDescriptor {
    pub name: String,
    pub source: PriceTagSource,
    /// Originating device for auto tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<i64>,
    /// Stored PDF file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_file: Option<String>,
}

/// Fixture entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Fixture {
    pub id: i64,
    pub name: String,
    pub fixture_type: FixtureType,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub devices: Vec<PlacedDevice>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub price_tags: Vec<PriceTagDescriptor>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Fixture {
    pub fn contains_any_device(&self, device_ids: &[i64]) -> bool {
        self.devices.iter().any(|d| device_ids.contains(&d.device_id))
    }
}

/// Create fixture payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCreate {
    pub name: String,
    #[serde(default)]
    pub fixture_type: FixtureType,
    #[serde(default)]
    pub devices: Vec<PlacedDeviceInput>,
    pub notes: Option<String>,
}

/// Update fixture payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureUpdate {
    pub name: Option<String>,
    pub fixture_type: Option<FixtureType>,
    pub notes: Option<String>,
}

/// Replace the device list of a fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureDevicesReplace {
    pub devices: Vec<PlacedDeviceInput>,
}

/// Add a manual price tag to a fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualPriceTagCreate {
    pub name: String,
}

/// Store ↔ fixture attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StoreFixture {
    pub store_id: i64,
    pub fixture_id: i64,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&FixtureType::DoppioBackToBack).unwrap(),
            "\"doppio_back_to_back\""
        );
        let t: FixtureType = serde_json::from_str("\"doppio_free_standing\"").unwrap();
        assert_eq!(t, FixtureType::DoppioFreeStanding);
    }

    #[test]
    fn test_placed_device_default_quantity() {
        let input: PlacedDeviceInput =
            serde_json::from_str(r#"{"device_id": 3, "position": 1}"#).unwrap();
        assert_eq!(input.quantity, 1);
        assert!(input.color.is_none());
    }

    #[test]
    fn test_price_tag_skips_empty_fields() {
        let tag = PriceTagDescriptor {
            name: "Cover".into(),
            source: PriceTagSource::Manual,
            device_id: None,
            pdf_file: None,
        };
        assert_eq!(
            serde_json::to_string(&tag).unwrap(),
            r#"{"name":"Cover","source":"manual"}"#
        );
    }
}
