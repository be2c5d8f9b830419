use chrono::NaiveDate;
use serde::Deserialize;
use types::FileUpload;

/// Episode save payload. `guest_ids` carries the form's guest selection in
/// display order; the association set is replaced wholesale on every save.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveEpisodeRequest {
    pub title: String,

    pub slug: String,

    pub yt_video_id: String,

    #[serde(default)]
    pub air_date: Option<NaiveDate>,

    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub is_live: bool,

    #[serde(default)]
    pub sponsor_id: Option<String>,

    #[serde(default)]
    pub guest_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveGuestRequest {
    /// Client-generated id, accepted on create. Generated server-side when
    /// absent.
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub twitter_url: Option<String>,

    #[serde(default)]
    pub linkedin_url: Option<String>,

    /// Replacement avatar. Uploaded before the record write; the resulting
    /// public URL supersedes `avatar_url`.
    #[serde(default)]
    pub avatar: Option<FileUpload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveSponsorRequest {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub logo_url: Option<String>,

    #[serde(default)]
    pub logo: Option<FileUpload>,
}
