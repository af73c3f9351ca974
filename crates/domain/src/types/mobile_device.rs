//! Mobile device types

use serde::{Deserialize, Serialize};

/// A phone or tablet registered with a home for geofencing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileDevice {
    pub name: String,
    pub id: i64,
    pub settings: MobileDeviceSettings,
    pub location: Option<MobileDeviceLocation>,
    pub device_metadata: DeviceMetadata,
}

/// Last known position of a mobile device relative to its home.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileDeviceLocation {
    pub stale: bool,
    pub at_home: bool,
    pub bearing_from_home: BearingFromHome,
    pub relative_distance_from_home_fence: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BearingFromHome {
    pub degrees: f64,
    pub radians: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceMetadata {
    pub platform: String,
    pub os_version: String,
    pub model: String,
    pub locale: String,
}

/// Settings of a mobile device (`homes/{home}/mobileDevices/{device}/settings`).
///
/// Sent as-is on update, so every flag is serialized, including `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileDeviceSettings {
    pub geo_tracking_enabled: bool,
    pub special_offers_enabled: bool,
    pub on_demand_log_retrieval_enabled: bool,
    pub push_notifications: PushNotificationSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PushNotificationSettings {
    pub low_battery_reminder: bool,
    pub away_mode_reminder: bool,
    pub home_mode_reminder: bool,
    pub open_window_reminder: bool,
    pub energy_savings_report_reminder: bool,
    pub incident_detection: bool,
    pub energy_iq_reminder: bool,
    pub tariff_high_price_alert: bool,
    pub tariff_low_price_alert: bool,
}
