mod api;
mod fallback;
mod middleware;

use std::sync::Arc;

use anyhow::Context;
use routeplan_graphhopper::GraphHopperClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = routeplan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = routeplan_db::PoolConfig::from_app_config(&config);
    let pool = routeplan_db::connect_pool(&config.database_url, pool_config).await?;
    routeplan_db::run_migrations(&pool).await?;

    let api_key = config
        .graphhopper_api_key
        .as_deref()
        .context("GRAPHHOPPER_API_KEY must be set to run the server")?;
    let graphhopper = GraphHopperClient::with_base_url(
        api_key,
        config.upstream_timeout_secs,
        &config.graphhopper_base_url,
    )?
    .with_country(config.geocode_country.clone());

    let app = build_app(AppState {
        pool,
        graphhopper: Arc::new(graphhopper),
        max_point_spread_deg: config.max_point_spread_deg,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "routeplan server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
