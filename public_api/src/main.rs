/**
 * Entrypoint for the `public_api` service: the public read API for the
 * Release Notes site, the session check, and the newsletter subscription
 * relay.
 */
use content_store::DynamoDbStore;
use public_api::{AppContext, router};

#[tokio::main]
async fn main() {
    let context: AppContext<DynamoDbStore> =
        rn_app::create_app_context().await.unwrap();

    let app = router(context);

    rn_axum::run_app(app).await.unwrap();
}
