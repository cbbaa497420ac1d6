//! # Homestretch Server
//!
//! The REST service behind the homepage editor and the HTML pages built
//! from it.
//!
//! - **config**: `ServerConfig` from defaults, an optional TOML file and
//!   the environment
//! - **store**: the persistent `SectionStore`
//! - **handlers** / **routes**: the `/api/homepage-sections` resource
//! - **pages**: public homepage and admin preview
//! - **auth**: bearer-token check for admin calls
//! - **uploads**: image validation and storage
//!

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;
pub mod store;
pub mod uploads;

pub use config::ServerConfig;
pub use error::{AppError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
pub use store::SectionStore;

use axum::Router;
use homestretch_core::{MAIN_HOMEPAGE, SiteResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open the store described by `config` and build the router around it
pub async fn build_app(config: ServerConfig) -> SiteResult<Router> {
    let store = SectionStore::open(&config.data_file)?;

    if config.seed_defaults {
        store.seed_if_empty(MAIN_HOMEPAGE).await?;
    }
    if config.admin_tokens.is_empty() {
        tracing::warn!("no admin tokens configured, every admin request will be rejected");
    }

    Ok(create_router(AppState::new(store, config)))
}

/// Bind and serve until Ctrl-C (or SIGTERM on unix)
pub async fn serve(config: ServerConfig) -> SiteResult<()> {
    let bind_addr = config.bind_address();
    let router = build_app(config).await?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(address = %bind_addr, "server is ready, listening for connections");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
