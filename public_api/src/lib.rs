//! Public-facing API for the Release Notes site: the live-or-latest
//! episode, episode lookup with next/previous navigation, the session
//! check, and the newsletter subscription relay.

pub mod error;
pub mod handlers;

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::{get, post},
};
use content_store::{ContentStore, DynamoDbStore, TableNames};
use serde::Deserialize;
use serde_json::json;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer,
};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub episodes_table: String,
    pub guests_table: String,
    pub sponsors_table: String,
    pub episode_guests_table: String,

    /// Newsletter provider credentials. Optional so that a missing value
    /// surfaces as a configuration error on the subscribe endpoint instead
    /// of failing every other route at startup.
    pub newsletter_api_key: Option<redact::Secret<String>>,
    pub newsletter_publication_id: Option<String>,

    #[serde(default = "default_newsletter_api_base")]
    pub newsletter_api_base: String,
}

fn default_newsletter_api_base() -> String {
    "https://api.beehiiv.com".to_string()
}

#[derive(Debug, Clone)]
pub struct AppContext<S: ContentStore> {
    pub store: S,
    pub http: reqwest::Client,
    pub config: Config,
}

impl rn_app::ContextProvider<Config> for AppContext<DynamoDbStore> {
    async fn new(config: Config, aws_config: aws_config::SdkConfig) -> Self {
        let client = aws_sdk_dynamodb::Client::new(&aws_config);
        let store = DynamoDbStore::new(
            client,
            TableNames {
                episodes: config.episodes_table.clone(),
                guests: config.guests_table.clone(),
                sponsors: config.sponsors_table.clone(),
                episode_guests: config.episode_guests_table.clone(),
            },
        );

        Self {
            store,
            http: reqwest::Client::new(),
            config,
        }
    }
}

pub fn router<S: ContentStore>(context: AppContext<S>) -> Router {
    let trace_layer = TraceLayer::new_for_http().on_request(
        |request: &Request<Body>, _: &tracing::Span| {
            tracing::info!(
                "received request: {method} {uri}",
                method = request.method(),
                uri = request.uri()
            );
        },
    );

    let cors_layer = CorsLayer::new()
        .allow_headers([
            header::ACCEPT,
            header::ACCEPT_ENCODING,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .allow_methods(tower_http::cors::Any)
        .allow_origin(tower_http::cors::Any);

    let compression_layer = CompressionLayer::new().gzip(true).deflate(true);

    Router::new()
        .route(
            "/api/latest-episode",
            get(handlers::episodes::latest_episode::<S>),
        )
        .route(
            "/api/episodes/next/{id}",
            get(handlers::episodes::next_episode::<S>),
        )
        .route(
            "/api/episodes/previous/{id}",
            get(handlers::episodes::previous_episode::<S>),
        )
        .route(
            "/api/episodes/{id}",
            get(handlers::episodes::get_episode::<S>),
        )
        .route("/api/check-admin", get(handlers::check_admin::check_admin))
        .route("/api/subscribe", post(handlers::subscribe::subscribe::<S>))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "application/json")],
                Json(json!({
                    "message": "not found",
                })),
            )
        })
        .layer(cors_layer)
        .layer(trace_layer)
        .layer(compression_layer)
        .with_state(context)
}
