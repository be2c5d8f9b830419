use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use content_store::ContentStore;
use serde_json::json;
use types::SubscribeRequest;

use crate::AppContext;
use crate::error::ApiError;

/// `POST /api/subscribe`
///
/// Forwards the submitted email address to the newsletter provider using
/// server-held credentials. Never forwards when either credential is
/// missing; that is a 500 configuration error.
pub async fn subscribe<S: ContentStore>(
    State(context): State<AppContext<S>>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Response, ApiError> {
    let email = body
        .email
        .filter(|email| !email.is_empty())
        .ok_or(ApiError::MissingEmail)?;

    let Some(api_key) = &context.config.newsletter_api_key else {
        tracing::error!("newsletter API key is not configured");
        return Err(ApiError::Configuration("Missing newsletter API key"));
    };

    let Some(publication_id) = &context.config.newsletter_publication_id
    else {
        tracing::error!("newsletter publication ID is not configured");
        return Err(ApiError::Configuration(
            "Missing newsletter publication ID",
        ));
    };

    let url = format!(
        "{base}/v2/publications/{publication_id}/subscriptions",
        base = context.config.newsletter_api_base
    );

    let response = context
        .http
        .post(&url)
        .bearer_auth(api_key.expose_secret())
        .json(&json!({
            "email": email,
            "send_welcome_email": true,
            "utm_source": "release-notes-form",
        }))
        .send()
        .await
        .map_err(|e| {
            tracing::error!("newsletter request failed: {e}");
            ApiError::Relay
        })?;

    let status = response.status();

    if !status.is_success() {
        let details: serde_json::Value =
            response.json().await.unwrap_or(serde_json::Value::Null);
        tracing::error!("newsletter API error: {details}");

        let status = StatusCode::from_u16(status.as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        return Ok((
            status,
            Json(json!({
                "error": "Failed to subscribe. Please try again later.",
                "details": details,
            })),
        )
            .into_response());
    }

    let data: serde_json::Value = response.json().await.map_err(|e| {
        tracing::error!("failed to parse newsletter response: {e}");
        ApiError::Relay
    })?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Successfully subscribed!",
            "data": data,
        })),
    )
        .into_response())
}
