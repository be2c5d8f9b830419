use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use content_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Episode not found")]
    EpisodeNotFound,

    #[error("Email is required")]
    MissingEmail,

    #[error("Server configuration error: {0}")]
    Configuration(&'static str),

    #[error("Failed to subscribe. Please try again later.")]
    Relay,

    #[error("{0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Self::EpisodeNotFound | Self::Store(StoreError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            Self::MissingEmail => StatusCode::BAD_REQUEST,
            Self::Configuration(_) | Self::Relay | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
