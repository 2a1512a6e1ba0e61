pub mod resolve;
pub mod routes;

use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use routes::AppState;

/// Bind the configured port and serve until the process exits.
pub async fn serve(state: Arc<AppState>, config: &ServerConfig) -> std::io::Result<()> {
    let addr = config.addr();
    let app = routes::router(state, config);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "branching-game listening");
    axum::serve(listener, app).await
}
