use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tracing::info;

use common::cors::frontend_cors;
use service::remote::{firebase::FirebaseStore, RemoteStore};
use service::storage::{backup::BackupWriter, seed::SeedData};

use crate::errors::StartupError;
use crate::routes::{self, ALLOW_CREDENTIALS, CORS_METHODS};
use crate::state::ServerState;

/// Load seed data, connect the remote store and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    cfg.firebase
        .validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    common::env::ensure_env(&cfg.data.backup_dir, &[cfg.data.seed_path.as_path()]).await?;

    let seed = SeedData::load(&cfg.data.seed_path).await?;
    let remote: Arc<dyn RemoteStore> = Arc::new(FirebaseStore::from_config(&cfg.firebase)?);
    info!(database_url = %cfg.firebase.database_url, "remote store client initialized");

    let state = ServerState::new(seed, remote, BackupWriter::new(&cfg.data.backup_dir));
    let cors = frontend_cors(&cfg.cors.allowed_origins, &CORS_METHODS, ALLOW_CREDENTIALS)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(routes::build_router(state, cors))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, "backend listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
