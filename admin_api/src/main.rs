/**
 * Entrypoint for the `admin_api` service: authenticated CRUD for the
 * Release Notes catalog plus avatar/logo upload handling.
 */
use content_store::{DynamoDbStore, S3Storage};

use admin_api::{AppContext, router};

#[tokio::main]
async fn main() {
    let context: AppContext<DynamoDbStore, S3Storage> =
        rn_app::create_app_context().await.unwrap();

    let app = router(context);

    rn_axum::run_app(app).await.unwrap();
}
