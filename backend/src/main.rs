//! Backend entry-point: configuration, logging and the HTTP server.

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::server::{run, AppConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(|e| std::io::Error::other(e.to_string()))?;
    run(config).await
}
