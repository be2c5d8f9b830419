use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use content_store::{ContentStore, ObjectStorage};
use rn_axum::cognito::CognitoUser;
use types::Sponsor;
use uuid::Uuid;

use super::structs::SaveSponsorRequest;
use crate::AppContext;
use crate::error::ApiError;
use crate::media;

/// `GET /admin/sponsors`
pub async fn list<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
) -> Result<Json<Vec<Sponsor>>, ApiError> {
    Ok(Json(context.store.list_sponsors().await?))
}

/// `GET /admin/sponsors/{id}`
pub async fn get<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
) -> Result<Json<Sponsor>, ApiError> {
    context
        .store
        .get_sponsor(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn save_sponsor<S: ContentStore, O: ObjectStorage>(
    context: &AppContext<S, O>,
    id: String,
    body: SaveSponsorRequest,
    new_record: bool,
) -> Result<Sponsor, ApiError> {
    let mut logo_url = body.logo_url;

    if let Some(upload) = &body.logo {
        logo_url = Some(
            media::store_upload(&context.storage, media::LOGO_PREFIX, &id, upload)
                .await?,
        );
    }

    let sponsor = Sponsor {
        id,
        name: body.name,
        website: body.website,
        logo_url,
    };

    if new_record {
        context.store.insert_sponsor(&sponsor).await?;
    } else {
        context.store.update_sponsor(&sponsor).await?;
    }

    Ok(sponsor)
}

/// `POST /admin/sponsors`
pub async fn create<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Json(mut body): Json<SaveSponsorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("create_sponsor");

    let id = body
        .id
        .take()
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let sponsor = save_sponsor(&context, id, body, true).await?;

    Ok((StatusCode::CREATED, Json(sponsor)))
}

/// `PUT /admin/sponsors/{id}`
pub async fn update<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
    Json(body): Json<SaveSponsorRequest>,
) -> Result<Json<Sponsor>, ApiError> {
    tracing::info!("update_sponsor");

    if context.store.get_sponsor(&id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let sponsor = save_sponsor(&context, id, body, false).await?;

    Ok(Json(sponsor))
}

/// `DELETE /admin/sponsors/{id}`
///
/// Removes the record, then best-effort deletes the backing logo object
/// when the stored URL belongs to the media bucket.
pub async fn delete<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("delete_sponsor");

    let Some(sponsor) = context.store.get_sponsor(&id).await? else {
        return Ok(StatusCode::NO_CONTENT);
    };

    context.store.delete_sponsor(&id).await?;

    if let Some(logo_url) = &sponsor.logo_url {
        media::remove_backing_object(&context.storage, logo_url).await;
    }

    Ok(StatusCode::NO_CONTENT)
}
