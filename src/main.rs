//! Homestretch server
//!
//! Serves the homepage section API, the public homepage and the admin
//! preview.

use anyhow::Context;
use homestretch_server::ServerConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env is fine
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!(
        name = "homestretch-server",
        version = homestretch_server::VERSION,
        core = homestretch_core::VERSION,
        "starting homestretch server",
    );

    let config = ServerConfig::load().context("failed to load configuration")?;
    tracing::info!(
        address = %config.bind_address(),
        data_file = %config.data_file.display(),
        upload_dir = %config.upload_dir.display(),
        admin_tokens = config.admin_tokens.len(),
        "configuration loaded",
    );

    homestretch_server::serve(config)
        .await
        .context("homestretch server stopped with an error")?;

    Ok(())
}

/// `RUST_LOG` controls the filter; the default logs requests at debug
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .compact(),
        )
        .init();
}
