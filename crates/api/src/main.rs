use std::sync::Arc;

use anyhow::Result;
use domain::services::store::{InMemoryPlannerStore, PlannerStore};
use persistence::PgPlannerStore;
use tracing::{info, warn};

use villa_araca_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging)?;
    middleware::init_metrics()?;

    info!("Starting Villa Araçá planner v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn PlannerStore> = match config.store.backend {
        config::StoreBackend::Postgres => {
            let pool = persistence::db::create_pool(&(&config.database).into()).await?;
            if config.store.run_migrations {
                info!("Running database migrations...");
                persistence::db::run_migrations(&pool).await?;
                info!("Migrations completed");
            }
            Arc::new(PgPlannerStore::new(pool))
        }
        config::StoreBackend::Memory => {
            warn!("Using in-memory planner store; data is lost on restart");
            Arc::new(InMemoryPlannerStore::new())
        }
    };

    let addr = config.socket_addr()?;
    let app = app::create_app(config, store);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
