//! Storefront Analytics - sales metrics for the admin dashboard

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_analytics::{config::Config, routes::{router, AppState}, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let config = Config::load()?;

    let state = match &config.database_url {
        Some(url) => {
            let db = PgPoolOptions::new().max_connections(config.max_connections).connect(url).await.context("connecting to DATABASE_URL")?;
            sqlx::migrate!("./migrations").run(&db).await.context("running migrations")?;
            AppState::from_store(PgStore::new(db), config.metrics_timeout)
        }
        None => {
            let store = if config.seed_demo_data { MemoryStore::demo(Utc::now()) } else { MemoryStore::default() };
            tracing::warn!(orders = store.order_count(), "DATABASE_URL not set, serving metrics from in-memory store");
            AppState::from_store(store, config.metrics_timeout)
        }
    };

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("🚀 Storefront analytics listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, router(state)).await?;
    Ok(())
}
