// router.rs
use crate::{commands, docs::ApiDoc, error::AppError, handlers::*, models::AppState};
use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::{any::Any, sync::Arc};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn build_router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(dashboard))
        .route("/api", post(handle_device_control))
        .route("/devices", get(get_device_states))
        .route("/devices/{device_id}", get(get_device_state))
        .route("/health", get(health_check));

    for request in commands::registered() {
        app = app.route(
            request.path(),
            get(move |State(state): State<Arc<AppState>>| async move {
                request.execute(state).await.map(Json)
            }),
        );
    }

    app.merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(anyhow::anyhow!(detail)).into_response()
}
