use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::{
    error::ApiError,
    services::{poster, record},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/:imdbId", get(get_poster))
}

/// GET /poster/:imdbId - Download the title's poster and stream it back as JPEG
///
/// The image is spooled to a temporary file first so a failed download never
/// turns into a truncated 200. The file is deleted once the body is dropped.
#[utoipa::path(
    get,
    path = "/poster/{imdbId}",
    tag = "movies",
    params(("imdbId" = String, Path, description = "IMDb id, `tt` prefix optional")),
    responses(
        (status = 200, description = "Poster image", content_type = "image/jpeg", body = Vec<u8>),
        (status = 404, description = "Movie or poster not found"),
        (status = 500, description = "Poster fetch failed")
    )
)]
pub async fn get_poster(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
) -> Result<Response, ApiError> {
    let record = record::load_record(state.provider.as_ref(), &imdb_id).await?;

    let url = record
        .poster_url
        .as_deref()
        .ok_or_else(|| ApiError::NotFound("No poster found".to_string()))?;

    let stream = state
        .provider
        .fetch_poster(url)
        .await
        .map_err(|e| ApiError::Fetch(e.to_string()))?;

    let spooled = poster::spool(stream).await?;
    let content_length = spooled.len();
    if content_length == 0 {
        return Err(ApiError::Fetch("Poster fetch failed".to_string()));
    }
    let disposition = format!("attachment; filename=\"{}.jpg\"", record.imdb_id);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (header::CONTENT_LENGTH, content_length.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(spooled.into_stream()),
    )
        .into_response())
}
