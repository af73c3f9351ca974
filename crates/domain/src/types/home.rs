//! Home, presence and climate types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether anybody is at home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Presence {
    Home,
    Away,
    /// Any value this version does not know about
    #[serde(other)]
    Unknown,
}

impl Presence {
    /// Wire representation (`HOME` / `AWAY`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Away => "AWAY",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for `PUT homes/{id}/presenceLock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceLock {
    pub home_presence: Presence,
}

/// A tado° home (`GET homes/{id}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Home {
    pub id: i64,
    pub name: String,
    pub date_time_zone: String,
    pub date_created: Option<DateTime<Utc>>,
    pub temperature_unit: String,
    pub partner: Option<String>,
    pub simple_smart_schedule_enabled: bool,
    pub away_radius_in_meters: f64,
    pub installation_completed: bool,
    pub incident_detection: IncidentDetection,
    pub generation: String,
    pub zones_count: i64,
    pub language: String,
    pub prevent_from_subscribing: bool,
    pub skills: Vec<serde_json::Value>,
    pub christmas_mode_enabled: bool,
    pub show_auto_assist_reminders: bool,
    pub contact_details: ContactDetails,
    pub address: Address,
    pub geolocation: Geolocation,
    pub consent_grant_skippable: bool,
    pub enabled_features: Vec<String>,
    pub is_air_comfort_eligible: bool,
    pub is_balance_ac_eligible: bool,
    pub is_energy_iq_eligible: bool,
    pub is_heat_source_installed: bool,
    pub is_heat_pump_installed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentDetection {
    pub supported: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Presence state of a home (`GET homes/{id}/state`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeState {
    pub presence: Option<Presence>,
    pub presence_locked: bool,
}

/// Air comfort summary (`GET homes/{id}/airComfort`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirComfort {
    pub freshness: Freshness,
    pub comfort: Vec<RoomComfort>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Freshness {
    pub value: String,
    pub last_open_window: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomComfort {
    pub room_id: i64,
    pub temperature_level: String,
    pub humidity_level: String,
    pub coordinate: ComfortCoordinate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComfortCoordinate {
    pub radial: f64,
    pub angular: i64,
}

/// Heating hardware installed in a home (`GET homes/{id}/heatingSystem`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeatingSystem {
    pub boiler: BoilerInfo,
    pub underfloor_heating: UnderfloorHeating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoilerInfo {
    pub present: bool,
    pub id: i64,
    pub found: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderfloorHeating {
    pub present: bool,
}

/// `GET homes/{id}/flowTemperatureOptimization`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowTemperatureOptimization {
    pub has_multiple_boiler_control_devices: bool,
    pub max_flow_temperature: i64,
    pub max_flow_temperature_constraints: FlowTemperatureLimits,
    pub auto_adaptation: FlowTemperatureAutoAdaptation,
    pub open_therm_device_serial_number: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowTemperatureLimits {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowTemperatureAutoAdaptation {
    pub enabled: bool,
    pub max_flow_temperature: Option<i64>,
}

/// Outside conditions at a home (`GET homes/{id}/weather`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Weather {
    pub solar_intensity: SolarIntensity,
    pub outside_temperature: OutsideTemperature,
    pub weather_state: WeatherState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarIntensity {
    #[serde(rename = "type")]
    pub kind: String,
    pub percentage: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutsideTemperature {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: String,
    pub precision: TemperaturePrecision,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperaturePrecision {
    pub celsius: f64,
    pub fahrenheit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherState {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub timestamp: Option<DateTime<Utc>>,
}
