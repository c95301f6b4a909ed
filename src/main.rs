use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use cycle_tracker_backend::config::Settings;
use cycle_tracker_backend::routes;
use cycle_tracker_backend::store::{MemoryStore, PgStore, SharedStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_env()?;

    let store: SharedStore = match settings.database_url.as_deref() {
        Some(url) => Arc::new(PgStore::connect(url, settings.max_connections).await?),
        None => {
            tracing::warn!("⚠️ DATABASE_URL not set, logs are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let app = routes::app(store);

    tracing::info!("🧠 Server running at {}", settings.bind_addr);

    axum::serve(
        tokio::net::TcpListener::bind(settings.bind_addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
