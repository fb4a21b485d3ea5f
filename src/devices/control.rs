// control.rs
use crate::models::{ControlAck, ControlValue};
use tracing::{info, warn};

/// Advisory reading of a control type tag. Never used to reject or alter a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    OnOff,
    Brightness,
    Color,
    Other,
}

impl From<&str> for ControlKind {
    fn from(tag: &str) -> Self {
        match tag {
            "onoff" => ControlKind::OnOff,
            "brightness" => ControlKind::Brightness,
            "color" => ControlKind::Color,
            _ => ControlKind::Other,
        }
    }
}

impl ControlKind {
    pub fn describe(self, device_id: &str, value: &ControlValue) -> Option<String> {
        match self {
            ControlKind::OnOff => Some(format!(
                "Turning {} {}",
                device_id,
                if value.is_on() { "ON" } else { "OFF" }
            )),
            ControlKind::Brightness => {
                Some(format!("Setting {device_id} brightness to {value}%"))
            }
            ControlKind::Color => Some(format!("Setting {device_id} color to {value}")),
            ControlKind::Other => None,
        }
    }
}

/// `device_control` subscriber: logs each accepted write and what it would do.
pub fn log_control(event: serde_json::Value) {
    let ack: ControlAck = match serde_json::from_value(event) {
        Ok(ack) => ack,
        Err(e) => {
            warn!("Malformed device_control event: {}", e);
            return;
        }
    };

    info!(
        device_id = %ack.device_id,
        "Device Control: {} -> {}: {}",
        ack.device_id,
        ack.control_type,
        ack.value
    );

    if let Some(action) =
        ControlKind::from(ack.control_type.as_str()).describe(&ack.device_id, &ack.value)
    {
        info!("  -> {}", action);
    }
}
