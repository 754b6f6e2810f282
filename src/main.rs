use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use neolung_core::{
    config::PRESENCE_POLICY_ENV, presence_policy_from_env_value, CollectionService, CoreConfig,
    InMemoryStore,
};

/// Main entry point for the NeoLung collection service
///
/// Serves the questionnaire REST API (with Swagger UI) until interrupted. Submissions are kept in
/// memory for the life of the process.
///
/// # Environment Variables
/// - `NEOLUNG_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `NEOLUNG_PRESENCE_POLICY`: `falsy` (default) or `zero-is-present`
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("neolung_run=info".parse()?)
                .add_directive("neolung_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("NEOLUNG_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let presence_policy = presence_policy_from_env_value(std::env::var(PRESENCE_POLICY_ENV).ok())?;
    let cfg = CoreConfig::new(presence_policy);

    tracing::info!("++ Starting NeoLung REST on {}", rest_addr);
    tracing::info!("++ Required-field presence policy: {:?}", cfg.presence_policy());

    let state = AppState {
        collection: CollectionService::new(&cfg, Arc::new(InMemoryStore::new())),
    };

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- NeoLung REST stopped; in-memory submissions discarded");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
