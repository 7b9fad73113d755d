use anyhow::Result;
use compass_ai::{OpenAiProvider, PositioningAnalyzer};
use compass_server::app;
use compass_server::config::{Secrets, ServerConfig};
use compass_server::state::AppState;
use compass_store::SupabaseStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("compass_server=info".parse()?))
        .init();

    tracing::info!("Starting up application");

    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("config/server.toml");

    let config = ServerConfig::load(config_path)?;
    let secrets = Secrets::from_env()?;

    let analyzer = OpenAiProvider::new(
        secrets.openai_api_key,
        Some(config.ai.model.clone()),
        Some(config.ai.base_url.clone()),
        Some(config.ai.timeout_secs),
        config.ai.max_tokens,
        config.ai.temperature,
    )?;
    let store = SupabaseStore::new(
        secrets.supabase_url,
        secrets.supabase_key,
        Some(config.store.table.clone()),
        Some(config.store.timeout_secs),
    )?;

    tracing::info!(
        provider = analyzer.provider(),
        model = analyzer.model_name(),
        table = %config.store.table,
        "Clients initialized"
    );

    let http_addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    let state = AppState {
        analyzer: Arc::new(analyzer),
        store: Arc::new(store),
        config: Arc::new(config),
    };

    let app = app::build_http_app(state);
    let listener = tokio::net::TcpListener::bind(http_addr).await?;

    tracing::info!(http = %http_addr, "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
