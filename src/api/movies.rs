// Movies API - title details and template rendering

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ApiError,
    models::{MovieMeta, MovieRecord},
    services::{record, render, tags::TagMap},
    AppState,
};

/// Routes for /movie
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/:imdbId", get(get_movie))
}

/// Routes for /render
pub fn render_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(render_template))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieDetails {
    pub meta: MovieMeta,
    /// Fixed set of 15 template tags, in display order
    #[schema(value_type = Object)]
    pub tags: TagMap,
}

impl From<&MovieRecord> for MovieDetails {
    fn from(record: &MovieRecord) -> Self {
        Self {
            meta: MovieMeta::from(record),
            tags: TagMap::from_record(record),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RenderQuery {
    /// IMDb id, with or without the `tt` prefix
    pub imdb_id: Option<String>,
    /// Text with `#TAG` or `{TAG}` placeholders
    pub template: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RenderedTemplate {
    pub rendered: String,
}

/// GET /movie/:imdbId - Title metadata plus its tag dictionary
#[utoipa::path(
    get,
    path = "/movie/{imdbId}",
    tag = "movies",
    params(("imdbId" = String, Path, description = "IMDb id, `tt` prefix optional")),
    responses(
        (status = 200, description = "Title metadata and tags", body = MovieDetails),
        (status = 404, description = "Movie not found"),
        (status = 500, description = "Provider failure")
    )
)]
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
) -> Result<Json<MovieDetails>, ApiError> {
    let record = record::load_record(state.provider.as_ref(), &imdb_id).await?;
    Ok(Json(MovieDetails::from(&record)))
}

/// GET /render?imdb_id=&template= - Substitute #TAG / {TAG} placeholders
/// Example: /render?imdb_id=tt7838252&template=%23TITLE%20(%23YEAR)
#[utoipa::path(
    get,
    path = "/render",
    tag = "movies",
    params(RenderQuery),
    responses(
        (status = 200, description = "Rendered template", body = RenderedTemplate),
        (status = 404, description = "Movie not found"),
        (status = 422, description = "Missing imdb_id or template"),
        (status = 500, description = "Provider failure")
    )
)]
pub async fn render_template(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderedTemplate>, ApiError> {
    let imdb_id = query
        .imdb_id
        .ok_or_else(|| {
            ApiError::InvalidRequest("Query parameter 'imdb_id' is required".to_string())
        })?;
    let template = query
        .template
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError::InvalidRequest("Query parameter 'template' is required".to_string())
        })?;

    let record = record::load_record(state.provider.as_ref(), &imdb_id).await?;
    let tags = TagMap::from_record(&record);

    Ok(Json(RenderedTemplate {
        rendered: render::render(&template, &tags),
    }))
}
