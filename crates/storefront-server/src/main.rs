mod api;
mod middleware;
mod revalidate;
mod sessions;
#[cfg(test)]
mod test_support;

use std::time::Duration;

use storefront_cms::{Catalog, CmsClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::sessions::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        space = %config.cms.space_id,
        environment = %config.cms.environment,
        content_type = %config.content_type,
        "starting storefront server"
    );

    let catalog = Catalog::new(CmsClient::from_config(&config)?);
    let sessions = SessionStore::new(
        config.max_sessions,
        Duration::from_secs(config.session_idle_secs),
    );
    let state = AppState::new(
        catalog,
        Duration::from_secs(config.detail_revalidate_secs),
        sessions,
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
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
