use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A podcast episode. `air_date` is `None` while the episode is unscheduled;
/// unscheduled episodes can be fetched by id but are never reachable through
/// next/previous navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,

    pub title: String,

    pub slug: String,

    pub yt_video_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_date: Option<NaiveDate>,

    /// Wall-clock start time, e.g. "19:00". Display-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default)]
    pub is_live: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Either an externally supplied URL or the public URL of an uploaded
    /// object in the media bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Join record between an episode and a guest. For a fixed episode the
/// `order_position` values are dense, zero-based, and unique; they encode
/// the display order of the guest list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeGuest {
    pub episode_id: String,

    pub guest_id: String,

    pub order_position: i32,
}

/// The public-facing episode shape: the episode row joined with its ordered
/// guests and its sponsor, as served by `/api/latest-episode` and
/// `/api/episodes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeDetail {
    pub id: String,

    pub title: String,

    pub slug: String,

    pub yt_video_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_live: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_id: Option<String>,

    #[serde(default)]
    pub guests: Vec<Guest>,

    pub sponsor: Option<Sponsor>,
}

impl EpisodeDetail {
    #[must_use]
    pub fn new(
        episode: Episode,
        guests: Vec<Guest>,
        sponsor: Option<Sponsor>,
    ) -> Self {
        Self {
            id: episode.id,
            title: episode.title,
            slug: episode.slug,
            yt_video_id: episode.yt_video_id,
            air_date: episode.air_date,
            is_live: episode.is_live,
            sponsor_id: episode.sponsor_id,
            guests,
            sponsor,
        }
    }
}

/// Reduced episode shape returned by the next/previous navigation endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub id: String,

    pub title: String,

    pub slug: String,
}

impl From<Episode> for EpisodeSummary {
    fn from(episode: Episode) -> Self {
        Self {
            id: episode.id,
            title: episode.title,
            slug: episode.slug,
        }
    }
}

/// Response of `GET /api/check-admin`. Any authenticated user has admin
/// access; there are no finer-grained roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCheckResponse {
    pub status: String,

    pub is_admin: bool,

    pub user_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub message: String,

    pub data: serde_json::Value,
}

/// A file carried inline in an admin save payload. The content is
/// base64-encoded so it survives the JSON body encoding API Gateway applies
/// to binary requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub file_name: String,

    pub content_type: String,

    /// Base64-encoded file content.
    pub data: String,
}

impl FileUpload {
    /// The filename extension, without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}
