use aws_config::{BehaviorVersion, meta::region::RegionProviderChain};
use figment::{Figment, providers::Env};

/// Builds a service's shared context from its extracted configuration and
/// the loaded AWS SDK configuration.
pub trait ContextProvider<Config> {
    fn new(
        config: Config,
        aws_config: aws_config::SdkConfig,
    ) -> impl Future<Output = Self>;
}

/// Initialize a service context: set up tracing, extract the service's
/// `Config` from environment variables with figment, and load AWS SDK
/// configuration from the default provider chain.
///
/// # Errors
///
/// Returns an error when a required configuration value is missing from the
/// environment or cannot be deserialized.
pub async fn create_app_context<'a, A, Config: serde::Deserialize<'a>>()
-> Result<A, figment::Error>
where
    A: ContextProvider<Config>,
{
    // CloudWatch-friendly subscriber settings: JSON lines, no ANSI, no
    // timestamps (ingestion adds them), no target or current-span noise.
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_current_span(false)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .init();

    let figment = Figment::new().merge(Env::raw());

    let config: Config = figment.extract()?;

    let region_provider =
        RegionProviderChain::default_provider().or_else("us-east-1");
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    let context = A::new(config, aws_config).await;

    Ok(context)
}
