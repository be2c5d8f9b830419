use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use content_store::{ContentStore, ObjectStorage};
use rn_axum::cognito::CognitoUser;
use types::Guest;
use uuid::Uuid;

use super::structs::SaveGuestRequest;
use crate::AppContext;
use crate::error::ApiError;
use crate::media;

/// `GET /admin/guests`
pub async fn list<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
) -> Result<Json<Vec<Guest>>, ApiError> {
    Ok(Json(context.store.list_guests().await?))
}

/// `GET /admin/guests/{id}`
pub async fn get<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
) -> Result<Json<Guest>, ApiError> {
    context
        .store
        .get_guest(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn save_guest<S: ContentStore, O: ObjectStorage>(
    context: &AppContext<S, O>,
    id: String,
    body: SaveGuestRequest,
    new_record: bool,
) -> Result<Guest, ApiError> {
    let mut avatar_url = body.avatar_url;

    if let Some(upload) = &body.avatar {
        avatar_url = Some(
            media::store_upload(
                &context.storage,
                media::AVATAR_PREFIX,
                &id,
                upload,
            )
            .await?,
        );
    }

    let guest = Guest {
        id,
        name: body.name,
        bio: body.bio,
        avatar_url,
        twitter_url: body.twitter_url,
        linkedin_url: body.linkedin_url,
    };

    // A record-write failure after a successful upload leaves the object
    // orphaned in the bucket.
    if new_record {
        context.store.insert_guest(&guest).await?;
    } else {
        context.store.update_guest(&guest).await?;
    }

    Ok(guest)
}

/// `POST /admin/guests`
///
/// Accepts a client-generated id; generates one when absent. A new avatar
/// is uploaded before the record write and its public URL persisted with
/// the record.
pub async fn create<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Json(mut body): Json<SaveGuestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("create_guest");

    let id = body
        .id
        .take()
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let guest = save_guest(&context, id, body, true).await?;

    Ok((StatusCode::CREATED, Json(guest)))
}

/// `PUT /admin/guests/{id}`
pub async fn update<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
    Json(body): Json<SaveGuestRequest>,
) -> Result<Json<Guest>, ApiError> {
    tracing::info!("update_guest");

    if context.store.get_guest(&id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let guest = save_guest(&context, id, body, false).await?;

    Ok(Json(guest))
}

/// `DELETE /admin/guests/{id}`
///
/// Removes the record, then best-effort deletes the backing avatar object
/// when the stored URL belongs to the media bucket. Externally-hosted
/// avatar URLs are left untouched.
pub async fn delete<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("delete_guest");

    let Some(guest) = context.store.get_guest(&id).await? else {
        return Ok(StatusCode::NO_CONTENT);
    };

    context.store.delete_guest(&id).await?;

    if let Some(avatar_url) = &guest.avatar_url {
        media::remove_backing_object(&context.storage, avatar_url).await;
    }

    Ok(StatusCode::NO_CONTENT)
}
