use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use content_store::ContentStore;
use types::{Episode, EpisodeDetail, EpisodeSummary};

use crate::AppContext;
use crate::error::ApiError;

/// Joins an episode with its ordered guests and its sponsor. Guest and
/// sponsor lookup failures degrade to an empty guest list or an absent
/// sponsor rather than failing the episode response.
async fn load_detail<S: ContentStore>(
    store: &S,
    episode: Episode,
) -> EpisodeDetail {
    let mut guests = Vec::new();

    match store.guests_for_episode(&episode.id).await {
        Ok(rows) => {
            for row in rows {
                match store.get_guest(&row.guest_id).await {
                    Ok(Some(guest)) => guests.push(guest),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!(
                            "failed to fetch guest {guest_id}: {e}",
                            guest_id = row.guest_id
                        );
                    }
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "failed to fetch guest relations for {episode_id}: {e}",
                episode_id = episode.id
            );
        }
    }

    let sponsor = match &episode.sponsor_id {
        Some(sponsor_id) => match store.get_sponsor(sponsor_id).await {
            Ok(sponsor) => sponsor,
            Err(e) => {
                tracing::error!("failed to fetch sponsor {sponsor_id}: {e}");
                None
            }
        },
        None => None,
    };

    EpisodeDetail::new(episode, guests, sponsor)
}

/// `GET /api/latest-episode`
///
/// The currently-live episode, or the most recently aired one. Cached at
/// the edge for 15 seconds so a stream going live shows up quickly.
pub async fn latest_episode<S: ContentStore>(
    State(context): State<AppContext<S>>,
) -> Result<impl IntoResponse, ApiError> {
    let episode = context
        .store
        .live_or_latest()
        .await?
        .ok_or(ApiError::EpisodeNotFound)?;

    tracing::info!(
        "serving latest episode: {id} {title}",
        id = episode.id,
        title = episode.title
    );

    let detail = load_detail(&context.store, episode).await;

    Ok((
        [(header::CACHE_CONTROL, "s-maxage=15")],
        Json(detail),
    ))
}

/// `GET /api/episodes/{id}`
pub async fn get_episode<S: ContentStore>(
    State(context): State<AppContext<S>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let episode = context
        .store
        .get_episode(&id)
        .await?
        .ok_or(ApiError::EpisodeNotFound)?;

    let detail = load_detail(&context.store, episode).await;

    Ok((
        [(header::CACHE_CONTROL, "s-maxage=300")],
        Json(detail),
    ))
}

/// `GET /api/episodes/next/{id}`
///
/// The episode with the smallest air date after the given episode's.
/// Unscheduled episodes have no neighbors in either direction.
pub async fn next_episode<S: ContentStore>(
    State(context): State<AppContext<S>>,
    Path(id): Path<String>,
) -> Result<Json<EpisodeSummary>, ApiError> {
    let current = context
        .store
        .get_episode(&id)
        .await?
        .ok_or(ApiError::EpisodeNotFound)?;

    let air_date = current.air_date.ok_or(ApiError::EpisodeNotFound)?;

    let next = context
        .store
        .next_after(air_date)
        .await?
        .ok_or(ApiError::EpisodeNotFound)?;

    Ok(Json(next.into()))
}

/// `GET /api/episodes/previous/{id}`
pub async fn previous_episode<S: ContentStore>(
    State(context): State<AppContext<S>>,
    Path(id): Path<String>,
) -> Result<Json<EpisodeSummary>, ApiError> {
    let current = context
        .store
        .get_episode(&id)
        .await?
        .ok_or(ApiError::EpisodeNotFound)?;

    let air_date = current.air_date.ok_or(ApiError::EpisodeNotFound)?;

    let previous = context
        .store
        .previous_before(air_date)
        .await?
        .ok_or(ApiError::EpisodeNotFound)?;

    Ok(Json(previous.into()))
}
