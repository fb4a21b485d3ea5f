// handlers.rs

use crate::{
    error::{AppError, ErrorBody},
    events::DEVICE_CONTROL,
    metrics,
    models::{AppState, ControlAck, ControlRequest, DeviceState, HealthSnapshot},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::Html,
};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, warn};

const DASHBOARD: &str = include_str!("../static/index.html");

#[utoipa::path(
    post,
    path = "/api",
    request_body = ControlRequest,
    responses(
        (status = 200, description = "Control stored", body = ControlAck),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
    )
)]
pub async fn handle_device_control(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ControlRequest>, JsonRejection>,
) -> Result<Json<ControlAck>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        metrics::record_rejected();
        warn!("Rejected control body: {}", rejection.body_text());
        AppError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;

    let stored = state.registry.set_state(request).inspect_err(|e| {
        metrics::record_rejected();
        warn!("Rejected control request: {}", e);
    })?;
    metrics::record_control(&stored.control_type, state.registry.len());

    let ack = ControlAck::from(stored);
    match serde_json::to_value(&ack) {
        Ok(event) => state.events.publish(DEVICE_CONTROL, event),
        Err(e) => warn!("Failed to encode device_control event: {}", e),
    }

    Ok(Json(ack))
}

#[utoipa::path(
    get,
    path = "/devices",
    responses((status = 200, description = "Latest state per device", body = BTreeMap<String, DeviceState>))
)]
pub async fn get_device_states(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, DeviceState>> {
    Json(state.registry.get_all_states())
}

#[utoipa::path(
    get,
    path = "/devices/{device_id}",
    params(("device_id" = String, Path, description = "Device identifier")),
    responses(
        (status = 200, description = "Latest state of the device", body = DeviceState),
        (status = 404, description = "Device not found", body = ErrorBody),
    )
)]
pub async fn get_device_state(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<String>,
) -> Result<Json<DeviceState>, AppError> {
    let result = state.registry.get_state(&device_id);
    metrics::record_lookup(result.is_ok());
    debug!(%device_id, found = result.is_ok(), "Device lookup");
    result.map(Json)
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthSnapshot))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthSnapshot> {
    Json(state.registry.health_snapshot())
}

pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD)
}
