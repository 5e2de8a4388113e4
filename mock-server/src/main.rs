use std::sync::Arc;

use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");

    let mut state = mock_server::MockState::seeded();
    if let Ok(token) = std::env::var("MOCK_API_TOKEN") {
        state = state.with_token(token);
    }

    let listener = TcpListener::bind(&addr).await?;
    info!("listening on http://{addr}{}", mock_server::API_PREFIX);
    mock_server::run_with_state(listener, Arc::new(RwLock::new(state))).await
}
