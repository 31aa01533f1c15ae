use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gemini_relay::config::Config;
use gemini_relay::routes;
use gemini_relay::services::gemini::GeminiClient;
use gemini_relay::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = config.socket_addr()?;

    let gemini = GeminiClient::new(config.gemini.clone());
    tracing::info!("using model {}", gemini.model());

    let state = Arc::new(AppState::new(Arc::new(gemini)));
    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
