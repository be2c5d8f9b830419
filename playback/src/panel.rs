use std::time::Duration;

use tokio::time::sleep;
use types::EpisodeDetail;

use crate::api::{ApiClientError, EpisodeApi};

/// Length of each half of the display transition.
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Visible,
    FadingOut,
    FadingIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    Latest,
}

/// Navigation state machine behind the episode playback panel.
///
/// Navigation is accepted only while `Visible`; a request arriving during a
/// transition is dropped. The state check is the only debounce: a slow fetch
/// is never cancelled, the next click simply waits for `Visible`.
#[derive(Debug)]
pub struct PlaybackPanel<A> {
    api: A,
    fade: Duration,
    state: TransitionState,
    current: Option<EpisodeDetail>,
    is_latest: bool,
    has_previous: bool,
    has_next: bool,
}

impl<A: EpisodeApi> PlaybackPanel<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_fade(api, DEFAULT_FADE)
    }

    #[must_use]
    pub fn with_fade(api: A, fade: Duration) -> Self {
        Self {
            api,
            fade,
            state: TransitionState::Visible,
            current: None,
            is_latest: false,
            has_previous: false,
            has_next: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> TransitionState {
        self.state
    }

    #[must_use]
    pub fn current(&self) -> Option<&EpisodeDetail> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_latest(&self) -> bool {
        self.is_latest
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Initial load: shows the live-or-latest episode with no transition.
    pub async fn load_latest(&mut self) -> Result<(), ApiClientError> {
        self.current = self.api.latest().await?;
        self.refresh_affordances().await
    }

    /// Runs one navigation through the fade cycle. Returns `Ok(false)`
    /// without side effects when the panel is mid-transition.
    ///
    /// The panel always returns to `Visible`, even when the fetch fails.
    pub async fn navigate(
        &mut self,
        navigation: Navigation,
    ) -> Result<bool, ApiClientError> {
        if self.state != TransitionState::Visible {
            return Ok(false);
        }

        self.state = TransitionState::FadingOut;
        sleep(self.fade).await;

        let result = self.apply(navigation).await;

        self.state = TransitionState::FadingIn;
        sleep(self.fade).await;
        self.state = TransitionState::Visible;

        result.map(|()| true)
    }

    async fn apply(
        &mut self,
        navigation: Navigation,
    ) -> Result<(), ApiClientError> {
        // The neighbor endpoints serve only `{id, title, slug}`; the full
        // detail comes from a follow-up episode fetch.
        let target = match (navigation, &self.current) {
            (Navigation::Latest, _) | (_, None) => self.api.latest().await?,
            (Navigation::Next, Some(current)) => {
                match self.api.next(&current.id).await? {
                    Some(summary) => self.api.episode(&summary.id).await?,
                    None => None,
                }
            }
            (Navigation::Previous, Some(current)) => {
                match self.api.previous(&current.id).await? {
                    Some(summary) => self.api.episode(&summary.id).await?,
                    None => None,
                }
            }
        };

        // No neighbor in that direction: stay put, but still refresh the
        // affordance flags.
        if let Some(target) = target {
            self.current = Some(target);
        }

        self.refresh_affordances().await
    }

    async fn refresh_affordances(&mut self) -> Result<(), ApiClientError> {
        let Some(current) = &self.current else {
            self.is_latest = false;
            self.has_previous = false;
            self.has_next = false;
            return Ok(());
        };

        let latest = self.api.latest().await?;
        self.is_latest =
            latest.is_some_and(|episode| episode.id == current.id);
        self.has_previous = self.api.previous(&current.id).await?.is_some();
        self.has_next = self.api.next(&current.id).await?.is_some();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use types::{Episode, EpisodeSummary};

    use super::*;

    /// Catalog fixture ordered oldest to newest; `latest` is the last
    /// element, neighbors follow list positions. Neighbor lookups serve
    /// the reduced summary shape, same as the service.
    #[derive(Debug, Clone)]
    struct ScriptedApi {
        episodes: Vec<EpisodeDetail>,
    }

    impl ScriptedApi {
        fn with_ids(ids: &[&str]) -> Self {
            let episodes = ids
                .iter()
                .map(|id| {
                    EpisodeDetail::new(
                        Episode {
                            id: (*id).to_string(),
                            title: format!("Episode {id}"),
                            slug: format!("episode-{id}"),
                            yt_video_id: "abc123".to_string(),
                            air_date: None,
                            start_time: None,
                            is_live: false,
                            sponsor_id: None,
                        },
                        vec![],
                        None,
                    )
                })
                .collect();

            Self { episodes }
        }

        fn position(&self, id: &str) -> Option<usize> {
            self.episodes.iter().position(|episode| episode.id == id)
        }
    }

    impl EpisodeApi for ScriptedApi {
        async fn latest(
            &self,
        ) -> Result<Option<EpisodeDetail>, ApiClientError> {
            Ok(self.episodes.last().cloned())
        }

        async fn episode(
            &self,
            id: &str,
        ) -> Result<Option<EpisodeDetail>, ApiClientError> {
            Ok(self
                .position(id)
                .map(|index| self.episodes[index].clone()))
        }

        async fn next(
            &self,
            id: &str,
        ) -> Result<Option<EpisodeSummary>, ApiClientError> {
            Ok(self
                .position(id)
                .and_then(|index| self.episodes.get(index + 1))
                .map(summary))
        }

        async fn previous(
            &self,
            id: &str,
        ) -> Result<Option<EpisodeSummary>, ApiClientError> {
            Ok(self
                .position(id)
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| self.episodes.get(index))
                .map(summary))
        }
    }

    fn summary(episode: &EpisodeDetail) -> EpisodeSummary {
        EpisodeSummary {
            id: episode.id.clone(),
            title: episode.title.clone(),
            slug: episode.slug.clone(),
        }
    }

    fn panel(ids: &[&str]) -> PlaybackPanel<ScriptedApi> {
        PlaybackPanel::with_fade(ScriptedApi::with_ids(ids), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_load_latest_sets_affordances() {
        let mut panel = panel(&["a", "b", "c"]);

        panel.load_latest().await.unwrap();

        assert_eq!(panel.current().unwrap().id, "c");
        assert!(panel.is_latest());
        assert!(panel.has_previous());
        assert!(!panel.has_next());
    }

    #[tokio::test]
    async fn test_navigation_walks_catalog_and_updates_flags() {
        let mut panel = panel(&["a", "b", "c"]);
        panel.load_latest().await.unwrap();

        assert!(panel.navigate(Navigation::Previous).await.unwrap());
        assert_eq!(panel.current().unwrap().id, "b");
        assert!(!panel.is_latest());
        assert!(panel.has_previous());
        assert!(panel.has_next());

        assert!(panel.navigate(Navigation::Previous).await.unwrap());
        assert_eq!(panel.current().unwrap().id, "a");
        assert!(!panel.has_previous());
        assert!(panel.has_next());

        assert!(panel.navigate(Navigation::Latest).await.unwrap());
        assert_eq!(panel.current().unwrap().id, "c");
        assert!(panel.is_latest());
    }

    #[tokio::test]
    async fn test_navigation_past_either_end_stays_put() {
        let mut panel = panel(&["a", "b"]);
        panel.load_latest().await.unwrap();

        assert!(panel.navigate(Navigation::Next).await.unwrap());
        assert_eq!(panel.current().unwrap().id, "b");

        panel.navigate(Navigation::Previous).await.unwrap();
        assert!(panel.navigate(Navigation::Previous).await.unwrap());
        assert_eq!(panel.current().unwrap().id, "a");
    }

    #[tokio::test]
    async fn test_navigation_ignored_while_transitioning() {
        let mut panel = panel(&["a", "b", "c"]);
        panel.load_latest().await.unwrap();

        panel.state = TransitionState::FadingOut;
        assert!(!panel.navigate(Navigation::Previous).await.unwrap());
        assert_eq!(panel.current().unwrap().id, "c");
        assert_eq!(panel.state(), TransitionState::FadingOut);

        panel.state = TransitionState::FadingIn;
        assert!(!panel.navigate(Navigation::Previous).await.unwrap());
        assert_eq!(panel.current().unwrap().id, "c");
    }

    #[tokio::test]
    async fn test_navigation_completes_back_to_visible() {
        let mut panel = panel(&["a", "b"]);
        panel.load_latest().await.unwrap();

        panel.navigate(Navigation::Previous).await.unwrap();
        assert_eq!(panel.state(), TransitionState::Visible);
    }

    #[tokio::test]
    async fn test_empty_catalog_navigation_is_accepted_but_inert() {
        let mut panel = panel(&[]);
        panel.load_latest().await.unwrap();

        assert!(panel.current().is_none());
        assert!(panel.navigate(Navigation::Latest).await.unwrap());
        assert!(panel.current().is_none());
        assert!(!panel.is_latest());
        assert!(!panel.has_previous());
        assert!(!panel.has_next());
    }
}
