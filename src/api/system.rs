// Service info and liveness endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_root_info))
        .route("/health", get(health))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RootInfo {
    pub ok: bool,
    pub message: String,
    #[schema(value_type = String)]
    pub version: &'static str,
    #[schema(value_type = Vec<String>)]
    pub endpoints: Vec<&'static str>,
}

const ENDPOINTS: [&str; 5] = [
    "/search",
    "/movie/{id}",
    "/render",
    "/poster/{id}",
    "/docs",
];

/// GET / - Liveness plus the list of available routes
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, description = "Service info", body = RootInfo))
)]
pub async fn get_root_info() -> Json<RootInfo> {
    Json(RootInfo {
        ok: true,
        message: format!("IMDb Mini API (v2). Endpoints: {}", ENDPOINTS.join(", ")),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS.to_vec(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "OK"
}
