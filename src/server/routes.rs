//! HTTP surface: axum router, game handler, and static file mounts.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::core::graph::{GameMap, START_NODE};
use crate::core::render::Renderer;
use crate::server::resolve::{self, game_path, Resolution, GAME_PREFIX};

/// Query parameter carrying the navigation direction.
pub const PATH_PARAM: &str = "path";

/// Read-only state shared by every request.
#[derive(Debug)]
pub struct AppState {
    pub map: GameMap,
    pub renderer: Renderer,
}

impl AppState {
    pub fn new(map: GameMap, renderer: Renderer) -> Arc<AppState> {
        Arc::new(AppState { map, renderer })
    }
}

/// Build the application router.
///
/// `/` redirects to the start node, `/static/*` always answers with the
/// stylesheet, `/images/*` serves the image directory, and every other path
/// is handled as a game page.
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .nest_service("/static", ServeFile::new(config.stylesheet()))
        .nest_service("/images", ServeDir::new(&config.images_dir))
        .fallback(game)
        .with_state(state)
}

async fn index() -> Redirect {
    Redirect::to(&format!("{}{}", GAME_PREFIX, START_NODE))
}

/// The first value of `name`, ignoring any repeats.
fn first_param<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

async fn game(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let path = uri.path();
    let token = first_param(&query, PATH_PARAM);
    let decoded = resolve::decode_path(path).ok();
    info!(
        query = ?query,
        path,
        matched = ?decoded.as_deref().and_then(|p| resolve::match_path(p).ok()),
        "game request"
    );

    let node = match resolve::resolve(&state.map, path, token) {
        Ok(Resolution::Redirect(next)) => return Redirect::to(&game_path(next)).into_response(),
        Ok(Resolution::Render(node)) => Some(node),
        Ok(Resolution::DeadEnd { from, direction }) => {
            warn!(node = %from.id, %direction, "no edge in that direction");
            None
        }
        Err(e) => {
            warn!(error = %e, "unresolved game request");
            None
        }
    };

    match state.renderer.render(&state.map, node) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_param_keeps_first_repeat() {
        let query = pairs(&[("foo", "bar"), ("path", "left"), ("path", "forward")]);
        assert_eq!(first_param(&query, "path"), Some("left"));
        assert_eq!(first_param(&query, "foo"), Some("bar"));
        assert_eq!(first_param(&query, "missing"), None);
    }
}
