use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use content_store::{ContentStore, ObjectStorage};
use rn_axum::cognito::CognitoUser;
use types::Episode;
use uuid::Uuid;

use super::structs::SaveEpisodeRequest;
use crate::AppContext;
use crate::error::ApiError;

fn episode_from_request(id: String, body: SaveEpisodeRequest) -> Episode {
    Episode {
        id,
        title: body.title,
        slug: body.slug,
        yt_video_id: body.yt_video_id,
        air_date: body.air_date,
        start_time: body.start_time,
        is_live: body.is_live,
        sponsor_id: body.sponsor_id,
    }
}

/// `GET /admin/episodes`
pub async fn list<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
) -> Result<Json<Vec<Episode>>, ApiError> {
    Ok(Json(context.store.list_episodes().await?))
}

/// `GET /admin/episodes/{id}`
pub async fn get<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
) -> Result<Json<Episode>, ApiError> {
    context
        .store
        .get_episode(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `GET /admin/episodes/{id}/guests`
///
/// The episode's guest ids in display order, for form population.
pub async fn guest_ids<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let rows = context.store.guests_for_episode(&id).await?;

    Ok(Json(rows.into_iter().map(|row| row.guest_id).collect()))
}

/// `POST /admin/episodes`
///
/// Writes the record, then replaces the guest association set so
/// `order_position` of the i-th submitted guest id equals `i`. A failure
/// of either step aborts the rest of the save.
pub async fn create<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Json(body): Json<SaveEpisodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("create_episode");

    let guest_ids = body.guest_ids.clone();
    let episode =
        episode_from_request(Uuid::now_v7().to_string(), body);

    context.store.insert_episode(&episode).await?;
    context
        .store
        .replace_for_episode(&episode.id, &guest_ids)
        .await?;

    Ok((StatusCode::CREATED, Json(episode)))
}

/// `PUT /admin/episodes/{id}`
pub async fn update<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
    Json(body): Json<SaveEpisodeRequest>,
) -> Result<Json<Episode>, ApiError> {
    tracing::info!("update_episode");

    if context.store.get_episode(&id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let guest_ids = body.guest_ids.clone();
    let episode = episode_from_request(id, body);

    context.store.update_episode(&episode).await?;
    context
        .store
        .replace_for_episode(&episode.id, &guest_ids)
        .await?;

    Ok(Json(episode))
}

/// `DELETE /admin/episodes/{id}`
///
/// Removes the association rows first, then the episode.
pub async fn delete<S: ContentStore, O: ObjectStorage>(
    State(context): State<AppContext<S, O>>,
    _user: CognitoUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("delete_episode");

    context.store.delete_for_episode(&id).await?;
    context.store.delete_episode(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
