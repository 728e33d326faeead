mod api;
mod cart_store;
mod middleware;
mod session;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use varsel_feed::{FeedCache, FeedClient, VariationProvider};

use crate::{
    api::{build_app, default_rate_limit_state, AppState, ShopSettings},
    cart_store::CartStore,
    session::SessionState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = varsel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = FeedClient::new(
        config.feed_url.clone(),
        config.feed_request_timeout_secs,
        &config.feed_user_agent,
    )?;
    let cache = FeedCache::new(Duration::from_secs(config.feed_cache_ttl_secs));
    let provider = Arc::new(VariationProvider::new(client, cache));

    let sessions = SessionState::from_config(&config)?;
    let state = AppState {
        provider,
        sessions,
        carts: CartStore::new(),
        shop: Arc::new(ShopSettings::from_config(&config)),
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
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
