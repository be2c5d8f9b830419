use serde::de::DeserializeOwned;
use thiserror::Error;
use types::{EpisodeDetail, EpisodeSummary};

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),
}

/// Read access to the episode catalog as the playback panel sees it. A
/// missing episode (404 from the service) is `Ok(None)`, never an error.
///
/// The neighbor lookups return the reduced summary shape the navigation
/// endpoints serve; the full detail comes from a follow-up `episode` call.
pub trait EpisodeApi {
    fn latest(
        &self,
    ) -> impl Future<Output = Result<Option<EpisodeDetail>, ApiClientError>> + Send;

    fn episode(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<EpisodeDetail>, ApiClientError>> + Send;

    fn next(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<EpisodeSummary>, ApiClientError>> + Send;

    fn previous(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<EpisodeSummary>, ApiClientError>> + Send;
}

/// `EpisodeApi` over the public read API.
#[derive(Debug, Clone)]
pub struct HttpEpisodeApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEpisodeApi {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ApiClientError> {
        let url = format!("{base}{path}", base = self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            tracing::error!("unexpected status {status} from {url}");
            return Err(ApiClientError::UnexpectedStatus(status.as_u16()));
        }

        Ok(Some(response.json().await?))
    }
}

impl EpisodeApi for HttpEpisodeApi {
    async fn latest(&self) -> Result<Option<EpisodeDetail>, ApiClientError> {
        self.fetch("/api/latest-episode").await
    }

    async fn episode(
        &self,
        id: &str,
    ) -> Result<Option<EpisodeDetail>, ApiClientError> {
        self.fetch(&format!("/api/episodes/{id}")).await
    }

    async fn next(
        &self,
        id: &str,
    ) -> Result<Option<EpisodeSummary>, ApiClientError> {
        self.fetch(&format!("/api/episodes/next/{id}")).await
    }

    async fn previous(
        &self,
        id: &str,
    ) -> Result<Option<EpisodeSummary>, ApiClientError> {
        self.fetch(&format!("/api/episodes/previous/{id}")).await
    }
}
