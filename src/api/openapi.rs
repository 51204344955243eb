//! OpenAPI document and the Swagger UI served at `/docs`.

use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "IMDb Mini API",
        description = "Search IMDb titles, read their metadata as tags, render tag templates and download posters",
    ),
    paths(
        super::system::get_root_info,
        super::system::health,
        super::search::search_titles,
        super::movies::get_movie,
        super::movies::render_template,
        super::poster::get_poster,
    ),
    components(schemas(
        super::system::RootInfo,
        crate::models::MovieMeta,
        super::movies::MovieDetails,
        super::movies::RenderedTemplate,
    )),
    tags(
        (name = "system", description = "Service info and liveness"),
        (name = "search", description = "Title search"),
        (name = "movies", description = "Title details, templates and posters"),
    )
)]
pub struct ApiDoc;

/// `/docs` (Swagger UI) and `/openapi.json` (raw document)
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}
