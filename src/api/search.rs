// Title search endpoint

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{MovieMeta, SearchHit},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(search_titles))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Title to search for
    pub q: Option<String>,
    /// Maximum number of hits. A negative value drops that many from the end.
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
}

/// Parse `limit` as a signed integer. Kept as text in the query struct so a
/// malformed value is a validation error instead of a rejected query string.
fn parse_limit(raw: Option<&str>, default: usize) -> Result<i64, ApiError> {
    match raw {
        None => Ok(i64::try_from(default).unwrap_or(i64::MAX)),
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            ApiError::InvalidRequest(format!(
                "Query parameter 'limit' must be an integer, got '{}'",
                raw
            ))
        }),
    }
}

/// GET /search?q=&limit= - Search IMDb titles by name
/// An empty result set is a 404 rather than an empty list
#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching titles", body = Vec<MovieMeta>),
        (status = 404, description = "No results found."),
        (status = 422, description = "Missing q or malformed limit"),
        (status = 500, description = "Provider failure")
    )
)]
pub async fn search_titles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let q = query
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ApiError::InvalidRequest("Query parameter 'q' is required".to_string())
        })?;
    let limit = parse_limit(query.limit.as_deref(), state.config.search.default_limit)?;

    let hits = if limit >= 0 {
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        state.provider.search_titles(&q, limit).await?
    } else {
        let mut hits = state.provider.search_titles(&q, usize::MAX).await?;
        let drop = usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX);
        hits.truncate(hits.len().saturating_sub(drop));
        hits
    };
    tracing::debug!("Search '{}' (limit {}) returned {} hits", q, limit, hits.len());

    if hits.is_empty() {
        return Err(ApiError::NoResults);
    }

    Ok(Json(hits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None, 10).unwrap(), 10);
        assert_eq!(parse_limit(Some("3"), 10).unwrap(), 3);
        assert_eq!(parse_limit(Some("-1"), 10).unwrap(), -1);
        assert!(matches!(
            parse_limit(Some("abc"), 10),
            Err(ApiError::InvalidRequest(_))
        ));
        assert!(matches!(
            parse_limit(Some(""), 10),
            Err(ApiError::InvalidRequest(_))
        ));
    }
}
