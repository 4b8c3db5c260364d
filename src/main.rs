use anyhow::Result;
use keyword_router::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal in production.
    let _ = dotenvy::dotenv();

    let config = config::load_from_env()?;
    init_tracing(&config);
    config.print_summary();

    keyword_router::server::run(config).await
}

fn init_tracing(config: &config::Config) {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
