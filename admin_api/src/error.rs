use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use content_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("record not found")]
    NotFound,

    #[error("invalid file upload")]
    InvalidUpload,

    #[error("{0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Self::NotFound | Self::Store(StoreError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidUpload => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
