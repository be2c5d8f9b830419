use std::time::Duration;

use content_store::{EpisodeStore, MemoryStore};
use playback::{EpisodeApi, HttpEpisodeApi, Navigation, PlaybackPanel};
use public_api::{AppContext, Config, router};
use types::Episode;

fn episode(id: &str, air_date: &str) -> Episode {
    Episode {
        id: id.to_string(),
        title: format!("Episode {id}"),
        slug: format!("episode-{id}"),
        yt_video_id: "dQw4w9WgXcQ".to_string(),
        air_date: Some(air_date.parse().unwrap()),
        start_time: None,
        is_live: false,
        sponsor_id: None,
    }
}

/// Serves the public read API over a local listener and returns a client
/// pointed at it.
async fn serve(store: MemoryStore) -> HttpEpisodeApi {
    let app = router(AppContext {
        store,
        http: reqwest::Client::new(),
        config: Config {
            episodes_table: "episodes".to_string(),
            guests_table: "guests".to_string(),
            sponsors_table: "sponsors".to_string(),
            episode_guests_table: "episode_guests".to_string(),
            newsletter_api_key: None,
            newsletter_publication_id: None,
            newsletter_api_base: "https://api.beehiiv.com".to_string(),
        },
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpEpisodeApi::new(reqwest::Client::new(), format!("http://{addr}"))
}

async fn two_episode_api() -> HttpEpisodeApi {
    let store = MemoryStore::new();
    store
        .insert_episode(&episode("a", "2025-01-01"))
        .await
        .unwrap();
    store
        .insert_episode(&episode("b", "2025-02-01"))
        .await
        .unwrap();

    serve(store).await
}

#[tokio::test]
async fn test_neighbor_lookups_decode_service_responses() {
    let api = two_episode_api().await;

    let next = api.next("a").await.unwrap().unwrap();
    assert_eq!(next.id, "b");
    assert_eq!(next.slug, "episode-b");

    assert!(api.next("b").await.unwrap().is_none());
    assert!(api.previous("a").await.unwrap().is_none());

    let previous = api.previous("b").await.unwrap().unwrap();
    assert_eq!(previous.id, "a");
}

#[tokio::test]
async fn test_detail_lookups_decode_service_responses() {
    let api = two_episode_api().await;

    let latest = api.latest().await.unwrap().unwrap();
    assert_eq!(latest.id, "b");
    assert_eq!(latest.yt_video_id, "dQw4w9WgXcQ");

    let detail = api.episode("a").await.unwrap().unwrap();
    assert_eq!(detail.title, "Episode a");

    assert!(api.episode("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_panel_navigates_over_the_wire() {
    let api = two_episode_api().await;
    let mut panel = PlaybackPanel::with_fade(api, Duration::ZERO);

    panel.load_latest().await.unwrap();
    assert_eq!(panel.current().unwrap().id, "b");
    assert!(panel.is_latest());
    assert!(panel.has_previous());
    assert!(!panel.has_next());

    assert!(panel.navigate(Navigation::Previous).await.unwrap());
    let current = panel.current().unwrap();
    assert_eq!(current.id, "a");
    assert_eq!(current.yt_video_id, "dQw4w9WgXcQ");
    assert!(!panel.is_latest());
    assert!(!panel.has_previous());
    assert!(panel.has_next());
}
