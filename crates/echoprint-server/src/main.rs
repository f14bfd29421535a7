use anyhow::Context;
use tracing_subscriber::EnvFilter;

use echoprint_server::calendar::CalendarClient;
use echoprint_server::routes::{create_router, AppState};
use echoprint_server::store::RecordStore;
use echoprint_server::{AppConfig, Workflow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("echoprint_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let calendar = CalendarClient::new(&config.calendar)?;
    let store = RecordStore::new(config.store.clone())?;
    let state = AppState::new(Workflow::new(calendar, store));

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("echoprint API listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
