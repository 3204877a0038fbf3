//! Hilo Game Server
//!
//! Serves the guessing game over HTTP and keeps the highscore file.

use tracing::info;
use tracing_subscriber::EnvFilter;

use hilo::{run, ServerConfig, SECRET_MAX, SECRET_MIN, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env();

    info!("Hilo Server v{}", VERSION);
    info!("Secret range: [{}, {}]", SECRET_MIN, SECRET_MAX);
    info!("Highscore file: {}", config.highscore_path.display());

    run(config).await?;
    Ok(())
}
