use std::sync::Arc;

use anyhow::Context;
use bloglist_backend::{
    infra::{
        database::PostgresDatabase,
        http_api::{AppState, start_http_api},
        memory::MemoryDatabase,
    },
    settings::Settings,
};
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_env().context("invalid configuration")?;
    let auth = settings.auth_config();
    let ownership = settings.ownership_policy();
    info!("ownership policy: {ownership:?}");

    match settings.database_url() {
        Some(database_url) => {
            let database = Arc::new(
                PostgresDatabase::connect(database_url, settings.database_max_connections)
                    .await
                    .context("failed to connect to postgres")?,
            );
            database.migrate().await.context("failed to run migrations")?;

            let state = AppState::new(database.clone(), auth, ownership);
            start_http_api(settings.listen_addr(), state).await?;

            database.close().await;
        }
        None => {
            warn!("DATABASE_URL not set, data will live in memory only");

            let state = AppState::new(Arc::new(MemoryDatabase::new()), auth, ownership);
            start_http_api(settings.listen_addr(), state).await?;
        }
    }

    info!("server stopped");

    Ok(())
}
