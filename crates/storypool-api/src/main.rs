//! Pipeline Launcher HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use storypool_api::{AppState, routes};
use storypool_config::Settings;
use storypool_core::TaskStore;
use storypool_queue::RedisTaskStore;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;

    info!("connecting to task store...");
    let task_store: Arc<dyn TaskStore> =
        Arc::new(RedisTaskStore::connect(&settings.redis_url).await?);
    info!("task store connected");

    let state = AppState::new(task_store);

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!("starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
