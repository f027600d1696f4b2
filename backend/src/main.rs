//! Evaluations server entry-point: loads settings, opens the store and serves
//! the REST API alongside the static front-end.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use evaluations::domain::ports::EvaluationRepository;
use evaluations::inbound::http::health::HealthState;
use evaluations::outbound::persistence::{DbPool, DieselEvaluationRepository, PoolConfig};
use evaluations::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let database_path = settings.database_path();
    let pool = DbPool::new(PoolConfig::new(database_path.to_string_lossy()))
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    DieselEvaluationRepository::new(pool.clone())
        .initialize()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!(path = %database_path.display(), "evaluation store ready");

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.bind_addr(), pool.clone())
        .with_static_dir(settings.static_dir());
    // Actix handles SIGINT/SIGTERM and resolves once the listener has stopped.
    let outcome = create_server(health_state.clone(), config)?.await;

    health_state.mark_unhealthy();
    pool.close();
    outcome
}
