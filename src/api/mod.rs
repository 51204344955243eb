use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

mod movies;
mod openapi;
mod poster;
mod search;
mod system;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(system::routes()) // / and /health
        .nest("/search", search::routes())
        .nest("/movie", movies::routes())
        .nest("/render", movies::render_routes())
        .nest("/poster", poster::routes())
        .merge(openapi::routes()) // /docs and /openapi.json
}

/// Full application: routes, permissive CORS, request tracing
pub fn app(state: Arc<AppState>) -> Router {
    routes()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
