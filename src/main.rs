//! Branching Game server entrypoint.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use branching_game::config::{ServerConfig, CONFIG_FILE};
use branching_game::core::graph::GameMap;
use branching_game::core::render::Renderer;
use branching_game::server::{self, routes::AppState};
use branching_game::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, from_file) = ServerConfig::load_or_default(Path::new(CONFIG_FILE))
        .with_context(|| format!("failed to read {}", CONFIG_FILE))?;

    telemetry::init(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = if from_file { CONFIG_FILE } else { "defaults" },
        port = config.port,
        "branching-game starting"
    );

    let map = GameMap::standard().context("game map failed validation")?;
    info!(nodes = map.len(), winner = %map.winner().id, "game map built");

    let renderer = Renderer::load(&config.static_dir).with_context(|| {
        format!("failed to load templates from {}", config.static_dir.display())
    })?;

    let state = AppState::new(map, renderer);
    server::serve(state, &config).await?;
    Ok(())
}
