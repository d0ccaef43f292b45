mod api;
mod icons;
mod middleware;
mod pages;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    icons::IconDefaults,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = propmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog = propmap_core::load_catalog(&config.catalog_path)?;
    tracing::info!(
        properties = catalog.len(),
        path = %config.catalog_path.display(),
        env = %config.env,
        "catalog loaded"
    );

    let icons = IconDefaults::default();
    let state = AppState {
        catalog: Arc::new(catalog),
        map: config.map,
        icons: icons.clone(),
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");

    // Not awaited: pages render with stock marker icons until (or unless) this lands.
    let _patch = icons.spawn_patch(config.icon_overrides_path.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
