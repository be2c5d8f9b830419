//! Content management API behind the admin UI: CRUD for episodes, guests,
//! and sponsors, guest-ordering maintenance, and avatar/logo upload
//! orchestration. Every route requires an authenticated user.

pub mod error;
pub mod handlers;
pub mod media;

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use content_store::{
    ContentStore, DynamoDbStore, ObjectStorage, S3Storage, TableNames,
};
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

    /// Bucket holding uploaded avatars and logos.
    pub media_bucket: String,
}

#[derive(Debug, Clone)]
pub struct AppContext<S: ContentStore, O: ObjectStorage> {
    pub store: S,
    pub storage: O,
    pub config: Config,
}

impl rn_app::ContextProvider<Config> for AppContext<DynamoDbStore, S3Storage> {
    async fn new(config: Config, aws_config: aws_config::SdkConfig) -> Self {
        let dynamodb = aws_sdk_dynamodb::Client::new(&aws_config);
        let s3 = aws_sdk_s3::Client::new(&aws_config);

        let store = DynamoDbStore::new(
            dynamodb,
            TableNames {
                episodes: config.episodes_table.clone(),
                guests: config.guests_table.clone(),
                sponsors: config.sponsors_table.clone(),
                episode_guests: config.episode_guests_table.clone(),
            },
        );
        let storage = S3Storage::new(s3, config.media_bucket.clone());

        Self {
            store,
            storage,
            config,
        }
    }
}

pub fn router<S: ContentStore, O: ObjectStorage>(
    context: AppContext<S, O>,
) -> Router {
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
            "/admin/episodes",
            get(handlers::episodes::list::<S, O>)
                .post(handlers::episodes::create::<S, O>),
        )
        .route(
            "/admin/episodes/{id}",
            get(handlers::episodes::get::<S, O>)
                .put(handlers::episodes::update::<S, O>)
                .delete(handlers::episodes::delete::<S, O>),
        )
        .route(
            "/admin/episodes/{id}/guests",
            get(handlers::episodes::guest_ids::<S, O>),
        )
        .route(
            "/admin/guests",
            get(handlers::guests::list::<S, O>)
                .post(handlers::guests::create::<S, O>),
        )
        .route(
            "/admin/guests/{id}",
            get(handlers::guests::get::<S, O>)
                .put(handlers::guests::update::<S, O>)
                .delete(handlers::guests::delete::<S, O>),
        )
        .route(
            "/admin/sponsors",
            get(handlers::sponsors::list::<S, O>)
                .post(handlers::sponsors::create::<S, O>),
        )
        .route(
            "/admin/sponsors/{id}",
            get(handlers::sponsors::get::<S, O>)
                .put(handlers::sponsors::update::<S, O>)
                .delete(handlers::sponsors::delete::<S, O>),
        )
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
