//! Catalogo de Jogos binary entrypoint wiring configuration, storage and the REST layer.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalogo_jogos::{
    config::{AppConfig, StorageBackend},
    dao::game_store::{GameStore, memory::MemoryGameStore},
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = open_store(&config).await;
    let app_state = AppState::new(store);

    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, storage = ?config.storage, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Open the configured storage backend, falling back to memory when it is unreachable.
async fn open_store(config: &AppConfig) -> Arc<dyn GameStore> {
    match config.storage {
        StorageBackend::Memory => Arc::new(MemoryGameStore::new()),
        StorageBackend::Mongo => open_mongo_store(config).await,
    }
}

#[cfg(feature = "mongo-store")]
async fn open_mongo_store(config: &AppConfig) -> Arc<dyn GameStore> {
    use catalogo_jogos::dao::game_store::mongodb::{MongoConfig, MongoGameStore};

    let connected = async {
        let mongo_config = MongoConfig::from_uri(&config.mongo_uri, Some(&config.mongo_db)).await?;
        MongoGameStore::connect(mongo_config).await
    }
    .await;

    match connected {
        Ok(store) => Arc::new(store),
        Err(err) => {
            warn!(error = %err, "MongoDB unavailable; falling back to in-memory storage");
            Arc::new(MemoryGameStore::new())
        }
    }
}

#[cfg(not(feature = "mongo-store"))]
async fn open_mongo_store(_config: &AppConfig) -> Arc<dyn GameStore> {
    warn!("built without the `mongo-store` feature; using in-memory storage");
    Arc::new(MemoryGameStore::new())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
