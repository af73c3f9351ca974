//! User account types

use serde::{Deserialize, Serialize};

use super::mobile_device::MobileDevice;

/// The authenticated tado° user (`GET me`).
///
/// Empty fields are omitted when serialized, so a value carrying only an `id`
/// encodes as `{"id":"..."}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub homes: Vec<BareHome>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub locale: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mobile_devices: Vec<MobileDevice>,
}

/// Home reference embedded in [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BareHome {
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_omits_empty_fields() {
        let user = User { id: "test-id".to_string(), ..Default::default() };
        assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"id":"test-id"}"#);
    }

    #[test]
    fn test_user_decodes_camel_case() {
        let json = r#"{
            "name": "Jane",
            "email": "jane@example.com",
            "id": "5a1b",
            "homes": [{"id": 42, "name": "Cabin"}],
            "mobileDevices": [{"id": 7, "name": "Phone"}]
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Jane");
        assert_eq!(user.homes, vec![BareHome { id: 42, name: "Cabin".to_string() }]);
        assert_eq!(user.mobile_devices.len(), 1);
        assert_eq!(user.mobile_devices[0].id, 7);
        assert!(user.locale.is_empty());
    }
}
