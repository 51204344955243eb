// Error type for API handlers
// Every variant maps to one HTTP status; the body is the plain-text detail message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::services::provider::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Movie or poster is absent
    #[error("{0}")]
    NotFound(String),

    /// Search returned nothing
    #[error("No results found.")]
    NoResults,

    /// Upstream metadata call failed
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Upstream poster download failed
    #[error("{0}")]
    Fetch(String),

    /// Required query parameter missing or empty
    #[error("{0}")]
    InvalidRequest(String),

    /// Temporary file handling failed while spooling a poster
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::NoResults => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Provider(_) | ApiError::Fetch(_) | ApiError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed upstream");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_produces_404() {
        let response = ApiError::NotFound("Movie not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_no_results_message() {
        assert_eq!(ApiError::NoResults.to_string(), "No results found.");
        assert_eq!(ApiError::NoResults.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_provider_error_surfaces_message() {
        let err = ApiError::from(ProviderError::Upstream("IMDb API error".into()));
        assert_eq!(err.to_string(), "IMDb API error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_request_is_422() {
        let response = ApiError::InvalidRequest("q must not be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
