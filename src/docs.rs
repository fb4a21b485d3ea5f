use utoipa::OpenApi;
use crate::{error, handlers, models};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::handle_device_control,
        handlers::get_device_states,
        handlers::get_device_state,
        handlers::health_check,
    ),
    components(
        schemas(
            models::ControlRequest,
            models::ControlAck,
            models::DeviceState,
            models::HealthSnapshot,
            models::RequestAck,
            error::ErrorBody,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_json_endpoints() {
        let doc = ApiDoc::openapi();
        for path in ["/api", "/devices", "/devices/{device_id}", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
