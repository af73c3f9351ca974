//! Resource services against a mocked tado° API.

mod common;

use common::client_for;
use reqwest::StatusCode;
use serde_json::json;
use tado::{ApiError, ApiErrorCategory, Context, MobileDeviceSettings, Presence};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_get(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/{route}")))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_me() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "me",
        json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "username": "jane@example.com",
            "id": "5a1b",
            "homes": [{"id": 1234, "name": "My Home"}],
            "locale": "en_US",
            "mobileDevices": []
        }),
    )
    .await;
    let client = client_for(&server);

    let user = client.user().get(&Context::background()).await.unwrap();

    assert_eq!(user.id, "5a1b");
    assert_eq!(user.homes[0].id, 1234);
    assert_eq!(user.locale, "en_US");
}

#[tokio::test]
async fn test_home_endpoints() {
    let server = MockServer::start().await;
    mount_get(&server, "homes/1234", json!({"id": 1234, "name": "My Home", "zonesCount": 3}))
        .await;
    mount_get(
        &server,
        "homes/1234/airComfort",
        json!({
            "freshness": {"value": "FAIR", "lastOpenWindow": "2024-11-02T08:00:00Z"},
            "comfort": [{"roomId": 1, "temperatureLevel": "COMFY", "humidityLevel": "HUMID",
                         "coordinate": {"radial": 0.3, "angular": 110}}]
        }),
    )
    .await;
    mount_get(
        &server,
        "homes/1234/heatingSystem",
        json!({"boiler": {"present": true, "id": 17, "found": true},
               "underfloorHeating": {"present": false}}),
    )
    .await;
    mount_get(
        &server,
        "homes/1234/flowTemperatureOptimization",
        json!({"maxFlowTemperature": 55,
               "maxFlowTemperatureConstraints": {"min": 30, "max": 80},
               "autoAdaptation": {"enabled": false, "maxFlowTemperature": null}}),
    )
    .await;
    mount_get(
        &server,
        "homes/1234/weather",
        json!({"weatherState": {"type": "WEATHER_STATE", "value": "SUNNY"}}),
    )
    .await;
    mount_get(&server, "homes/1234/state", json!({"presence": "AWAY", "presenceLocked": false}))
        .await;

    let client = client_for(&server);
    let ctx = Context::background();
    let homes = client.home();

    let home = homes.get(&ctx, 1234).await.unwrap();
    assert_eq!(home.name, "My Home");
    assert_eq!(home.zones_count, 3);

    let comfort = homes.air_comfort(&ctx, 1234).await.unwrap();
    assert_eq!(comfort.freshness.value, "FAIR");
    assert_eq!(comfort.comfort[0].coordinate.angular, 110);

    let heating = homes.heating_system(&ctx, 1234).await.unwrap();
    assert!(heating.boiler.present);
    assert!(!heating.underfloor_heating.present);

    let flow = homes.flow_temperature_optimization(&ctx, 1234).await.unwrap();
    assert_eq!(flow.max_flow_temperature, 55);
    assert_eq!(flow.max_flow_temperature_constraints.max, 80);
    assert!(flow.auto_adaptation.max_flow_temperature.is_none());

    let weather = homes.weather(&ctx, 1234).await.unwrap();
    assert_eq!(weather.weather_state.value, "SUNNY");

    let state = homes.state(&ctx, 1234).await.unwrap();
    assert_eq!(state.presence, Some(Presence::Away));
}

#[tokio::test]
async fn test_set_presence_sends_lock_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/homes/1234/presenceLock"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"homePresence": "AWAY"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    client.home().set_presence(&Context::background(), 1234, Presence::Away).await.unwrap();
}

#[tokio::test]
async fn test_mobile_device_endpoints() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "homes/1234/mobileDevices",
        json!([{"id": 1, "name": "Phone"}, {"id": 2, "name": "Tablet"}]),
    )
    .await;
    mount_get(
        &server,
        "homes/1234/mobileDevices/2",
        json!({"id": 2, "name": "Tablet", "location": {"atHome": true}}),
    )
    .await;
    mount_get(
        &server,
        "homes/1234/mobileDevices/2/settings",
        json!({"geoTrackingEnabled": true, "pushNotifications": {"awayModeReminder": true}}),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/homes/1234/mobileDevices/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = Context::background();
    let devices = client.mobile_device();

    let list = devices.list(&ctx, 1234).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].name, "Tablet");

    let tablet = devices.get(&ctx, 1234, 2).await.unwrap();
    assert!(tablet.location.is_some_and(|location| location.at_home));

    let settings = devices.settings(&ctx, 1234, 2).await.unwrap();
    assert!(settings.geo_tracking_enabled);
    assert!(settings.push_notifications.away_mode_reminder);

    devices.delete(&ctx, 1234, 1).await.unwrap();
}

#[tokio::test]
async fn test_update_settings_sends_every_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/homes/1234/mobileDevices/2/settings"))
        .and(body_json(json!({
            "geoTrackingEnabled": false,
            "specialOffersEnabled": false,
            "onDemandLogRetrievalEnabled": false,
            "pushNotifications": {
                "lowBatteryReminder": true,
                "awayModeReminder": false,
                "homeModeReminder": false,
                "openWindowReminder": false,
                "energySavingsReportReminder": false,
                "incidentDetection": false,
                "energyIqReminder": false,
                "tariffHighPriceAlert": false,
                "tariffLowPriceAlert": false
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "geoTrackingEnabled": false,
            "pushNotifications": {"lowBatteryReminder": true, "openWindowReminder": true}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut settings = MobileDeviceSettings::default();
    settings.push_notifications.low_battery_reminder = true;

    let stored = client
        .mobile_device()
        .update_settings(&Context::background(), 1234, 2, &settings)
        .await
        .unwrap();

    assert!(stored.push_notifications.low_battery_reminder);
    assert!(stored.push_notifications.open_window_reminder);
    assert!(!stored.geo_tracking_enabled);
}

#[tokio::test]
async fn test_update_settings_with_empty_reply() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/homes/1234/mobileDevices/2/settings"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let stored = client
        .mobile_device()
        .update_settings(&Context::background(), 1234, 2, &MobileDeviceSettings::default())
        .await
        .unwrap();

    assert_eq!(stored, MobileDeviceSettings::default());
}

#[tokio::test]
async fn test_error_status_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/homes/99"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"code": "accessDenied", "title": "access denied for home 99"}]
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client.home().get(&Context::background(), 99).await.unwrap_err();

    assert_eq!(err.category(), ApiErrorCategory::Api);
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(matches!(err, ApiError::Api { ref errors, .. } if errors[0].code == "accessDenied"));
}

#[tokio::test]
async fn test_empty_success_body_yields_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/homes/1234/state"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let state = client.home().state(&Context::background(), 1234).await.unwrap();

    assert_eq!(state, tado::HomeState::default());
}

#[tokio::test]
async fn test_cancelled_context_stops_service_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server);
    let ctx = Context::background();
    ctx.cancel();

    let err = client.user().get(&ctx).await.unwrap_err();

    assert_eq!(err.category(), ApiErrorCategory::Context);
}
