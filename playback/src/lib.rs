//! Client-side playback panel for the episode catalog: a thin HTTP client
//! over the public read API and the navigation state machine driving the
//! fade-out/fade-in display transition.

mod api;
mod panel;

pub use api::{ApiClientError, EpisodeApi, HttpEpisodeApi};
pub use panel::{DEFAULT_FADE, Navigation, PlaybackPanel, TransitionState};
