//! Domain types and models

pub mod home;
pub mod mobile_device;
pub mod user;

pub use home::{
    Address, AirComfort, BoilerInfo, ComfortCoordinate, ContactDetails, FlowTemperatureLimits,
    FlowTemperatureOptimization, FlowTemperatureAutoAdaptation, Freshness, Geolocation,
    HeatingSystem, Home, HomeState, IncidentDetection, OutsideTemperature, Presence,
    PresenceLock, RoomComfort, SolarIntensity, TemperaturePrecision, UnderfloorHeating, Weather,
    WeatherState,
};
pub use mobile_device::{
    BearingFromHome, DeviceMetadata, MobileDevice, MobileDeviceLocation, MobileDeviceSettings,
    PushNotificationSettings,
};
pub use user::{BareHome, User};
