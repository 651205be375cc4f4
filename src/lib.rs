use std::path::Path;
use std::sync::Arc;

use crate::auth::hash_password;
use crate::model::entity::UserEntityCreate;
use crate::model::{DbConnection, LmsStore, MemoryStore, ModelManager, PgStore};
use crate::utils::signal::shutdown_signal;
use crate::web::UserRole;
use crate::{error::AppResult, web::AppState};
use axum::Router;
use tokio::net::TcpListener;

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod auth;
pub mod client;
pub mod error;
pub mod learning;
pub mod model;
pub mod navigation;
pub mod render;
pub mod tokens;
pub mod utils;
pub mod web;

static APPLICATION_NAME: &str = "safety-lms";

pub async fn build_server() -> AppResult<(AppState, Router)> {
    let use_local = cfg!(debug_assertions);
    let config = config::Config::get_or_init(use_local).await;

    let store: Arc<dyn LmsStore> = if config.app().uses_memory_store() {
        tracing::info!("using the in-memory store");
        Arc::new(seeded_memory_store(config).await?)
    } else {
        let db = DbConnection::connect(config.app().database_uri())?;
        db.migrate(Path::new("./migrations")).await?;

        Arc::new(PgStore::new(ModelManager::new(db)))
    };

    build_server_with_store(store, config.clone())
}

pub fn build_server_with_store(store: Arc<dyn LmsStore>, config: Config) -> AppResult<(AppState, Router)> {
    let state = AppState::new(store, config);
    let app = web::routes::build_app(state.clone());
    Ok((state, app))
}

async fn seeded_memory_store(config: &Config) -> AppResult<MemoryStore> {
    let store = MemoryStore::new();

    if let Some(admin) = config.app().seed_admin() {
        store
            .create_user(UserEntityCreate {
                email: admin.email().to_lowercase(),
                full_name: String::from("Administrator"),
                password_hash: hash_password(admin.password())?,
                role: UserRole::Admin,
                job_title: String::from("Safety Manager"),
            })
            .await?;
        tracing::debug!("seeded admin account {}", admin.email());
    }

    Ok(store)
}

#[tracing::instrument]
pub async fn setup_workers() -> AppResult<()> {
    let (_, app) = build_server().await?;
    let config = Config::get_or_init(false).await;
    let listener = TcpListener::bind(config.host().bindto()).await?;

    tracing::info!("axum is starting at: {}", config.host().bindto());
    let axum_handle = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    axum_handle.await?;
    Ok(())
}

fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}

#[tracing::instrument]
pub async fn run() -> AppResult<()> {
    setup_trace();
    setup_workers().await?;
    Ok(())
}
