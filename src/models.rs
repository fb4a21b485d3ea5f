use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::{devices::DeviceRegistry, events::EventBus};

/// Control value as sent by the client. Numbers keep their original JSON
/// representation so `1` is echoed as `1` and `1.5` as `1.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Text(String),
    Number(serde_json::Number),
}

impl ControlValue {
    /// On/off reading used for advisory output: `"1"` or `1` means on.
    pub fn is_on(&self) -> bool {
        match self {
            ControlValue::Text(text) => text == "1",
            ControlValue::Number(number) => number.as_u64() == Some(1),
        }
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Text(text) => f.write_str(text),
            ControlValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for ControlValue {
    fn from(value: &str) -> Self {
        ControlValue::Text(value.to_string())
    }
}

impl From<i64> for ControlValue {
    fn from(value: i64) -> Self {
        ControlValue::Number(value.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceState {
    #[serde(skip)]
    pub device_id: String,
    #[serde(rename = "type")]
    pub control_type: String,
    #[schema(value_type = Object)]
    pub value: ControlValue,
    #[serde(rename = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api`. Every field is optional on the wire so that absent
/// and `null` fields surface as validation errors rather than parse errors.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ControlRequest {
    #[validate(required, length(min = 1))]
    pub device_id: Option<String>,
    #[serde(rename = "type")]
    #[validate(required, length(min = 1))]
    pub control_type: Option<String>,
    #[validate(required)]
    #[schema(value_type = Object)]
    pub value: Option<ControlValue>,
}

impl ControlRequest {
    pub fn new(
        device_id: impl Into<String>,
        control_type: impl Into<String>,
        value: impl Into<ControlValue>,
    ) -> Self {
        Self {
            device_id: Some(device_id.into()),
            control_type: Some(control_type.into()),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ControlAck {
    pub status: String,
    pub device_id: String,
    #[serde(rename = "type")]
    pub control_type: String,
    #[schema(value_type = Object)]
    pub value: ControlValue,
}

impl From<DeviceState> for ControlAck {
    fn from(state: DeviceState) -> Self {
        Self {
            status: "success".to_string(),
            device_id: state.device_id,
            control_type: state.control_type,
            value: state.value,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthSnapshot {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub devices_count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestAck {
    pub status: &'static str,
    pub message: String,
}

pub struct AppState {
    pub registry: DeviceRegistry,
    pub events: EventBus,
}

impl AppState {
    pub fn new() -> Self {
        let events = EventBus::new();
        events.subscribe(crate::events::DEVICE_CONTROL, crate::devices::log_control);
        Self {
            registry: DeviceRegistry::new(),
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_keeps_number_representation() {
        let value: ControlValue = serde_json::from_value(json!(75)).unwrap();
        assert_eq!(value, ControlValue::from(75_i64));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(75));

        let value: ControlValue = serde_json::from_value(json!(0.5)).unwrap();
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(0.5));
    }

    #[test]
    fn value_accepts_empty_string() {
        let value: ControlValue = serde_json::from_value(json!("")).unwrap();
        assert_eq!(value, ControlValue::from(""));
    }

    #[test]
    fn value_rejects_non_scalars() {
        assert!(serde_json::from_value::<ControlValue>(json!({"r": 1})).is_err());
        assert!(serde_json::from_value::<ControlValue>(json!(true)).is_err());
    }

    #[test]
    fn on_reading_accepts_text_and_number() {
        assert!(ControlValue::from("1").is_on());
        assert!(ControlValue::from(1_i64).is_on());
        assert!(!ControlValue::from("0").is_on());
        assert!(!ControlValue::from("on").is_on());
    }

    #[test]
    fn request_null_fields_deserialize_as_absent() {
        let request: ControlRequest =
            serde_json::from_value(json!({"device_id": "lamp1", "type": null})).unwrap();
        assert_eq!(request.device_id.as_deref(), Some("lamp1"));
        assert!(request.control_type.is_none());
        assert!(request.value.is_none());
    }

    #[test]
    fn request_validation_flags_missing_and_empty_fields() {
        assert!(ControlRequest::new("lamp1", "onoff", "1").validate().is_ok());
        assert!(ControlRequest::new("lamp1", "onoff", "").validate().is_ok());
        assert!(ControlRequest::new("", "onoff", "1").validate().is_err());
        assert!(ControlRequest::new("lamp1", "", "1").validate().is_err());
        assert!(ControlRequest::default().validate().is_err());
    }

    #[test]
    fn device_state_wire_shape() {
        let state = DeviceState {
            device_id: "lamp1".into(),
            control_type: "onoff".into(),
            value: "1".into(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["type"], "onoff");
        assert_eq!(json["value"], "1");
        assert!(json["timestamp"].is_string());
        assert!(json.get("device_id").is_none());
    }
}
