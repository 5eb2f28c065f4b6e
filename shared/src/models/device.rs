//! Device catalog model

use serde::{Deserialize, Serialize};

/// Device kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum DeviceKind {
    Iphone,
    Watch,
    Ipad,
    Mac,
    Airpods,
    Accessory,
    #[default]
    Other,
}

impl DeviceKind {
    /// iPhone and Watch devices get an automatic price tag when placed on a table
    pub fn has_auto_price_tag(&self) -> bool {
        matches!(self, Self::Iphone | Self::Watch)
    }
}

/// Device catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub kind: DeviceKind,
    pub color: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create device payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCreate {
    pub name: String,
    #[serde(default)]
    pub kind: DeviceKind,
    pub color: Option<String>,
}

/// Update device payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceUpdate {
    pub name: Option<String>,
    pub kind: Option<DeviceKind>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}
