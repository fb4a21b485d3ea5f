// devices/mod.rs
mod control;
pub use control::log_control;

use crate::{
    error::AppError,
    models::{ControlRequest, DeviceState, HealthSnapshot},
};
use chrono::Utc;
use dashmap::DashMap;
use std::collections::BTreeMap;
use validator::Validate;

/// In-memory last-write-wins store of the latest control applied to each device.
///
/// Entries are only ever created or replaced; nothing is removed until the
/// registry is dropped.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    states: DashMap<String, DeviceState>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            states: DashMap::new(),
        }
    }

    pub fn set_state(&self, request: ControlRequest) -> Result<DeviceState, AppError> {
        if let Err(errors) = request.validate() {
            let mut fields: Vec<_> = errors
                .field_errors()
                .keys()
                .map(|field| match field.to_string().as_str() {
                    "control_type" => "type".to_string(),
                    other => other.to_string(),
                })
                .collect();
            fields.sort();
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                fields.join(", ")
            )));
        }

        let (Some(device_id), Some(control_type), Some(value)) =
            (request.device_id, request.control_type, request.value)
        else {
            return Err(AppError::Validation("Missing required fields".into()));
        };

        let state = DeviceState {
            device_id: device_id.clone(),
            control_type,
            value,
            updated_at: Utc::now(),
        };
        self.states.insert(device_id, state.clone());

        Ok(state)
    }

    pub fn get_state(&self, device_id: &str) -> Result<DeviceState, AppError> {
        self.states
            .get(device_id)
            .map(|entry| entry.value().clone())
            .ok_or(AppError::DeviceNotFound)
    }

    /// Snapshot of every tracked device, ordered by id.
    pub fn get_all_states(&self) -> BTreeMap<String, DeviceState> {
        self.states
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn health_snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            status: "healthy",
            timestamp: Utc::now(),
            devices_count: self.len(),
        }
    }
}
