//! Request resolution: path matching, node lookup, and the optional
//! navigation step, independent of the HTTP framework.

use std::borrow::Cow;
use std::sync::OnceLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use thiserror::Error;

use crate::core::graph::GameMap;
use crate::schema::node::{Direction, Node};

/// Path prefix for game pages.
pub const GAME_PREFIX: &str = "/game/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("invalid node: {0}")]
    InvalidNode(String),
}

/// What the handler should do with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Navigation succeeded; send the client to this node's page.
    Redirect(&'a Node),
    /// Render the page for this node.
    Render(&'a Node),
    /// A `path` step was requested but `from` has no edge that way.
    DeadEnd { from: &'a Node, direction: Direction },
}

/// The canonical page URL for a node.
pub fn game_path(node: &Node) -> String {
    format!("{}{}", GAME_PREFIX, node.id)
}

const GAME_PATH_PATTERN: &str = r"^/game/([a-zA-Z0-9]+)$";

/// Percent-decode a request path. Bytes that do not decode to UTF-8 make
/// the path invalid.
pub fn decode_path(path: &str) -> Result<Cow<'_, str>, RouteError> {
    percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| RouteError::InvalidPath(path.to_string()))
}

/// Extract `<id>` from a decoded `/game/<id>`, where `<id>` is one or more
/// ASCII letters or digits and nothing follows it.
pub fn match_path(path: &str) -> Result<&str, RouteError> {
    static GAME_PATH: OnceLock<Regex> = OnceLock::new();
    let game_path = GAME_PATH.get_or_init(|| Regex::new(GAME_PATH_PATTERN).unwrap());

    game_path
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str())
        .ok_or_else(|| RouteError::InvalidPath(path.to_string()))
}

/// Resolve a raw request path and optional `path` query token against the
/// map. The path is percent-decoded before matching.
pub fn resolve<'a>(
    map: &'a GameMap,
    path: &str,
    token: Option<&str>,
) -> Result<Resolution<'a>, RouteError> {
    let decoded = decode_path(path)?;
    let id = match_path(&decoded)?;
    let node = map
        .lookup(id)
        .ok_or_else(|| RouteError::InvalidNode(id.to_string()))?;

    let Some(token) = token else {
        return Ok(Resolution::Render(node));
    };

    let direction = Direction::from_token(token);
    Ok(match map.step(node, direction) {
        Some(next) => Resolution::Redirect(next),
        None => Resolution::DeadEnd {
            from: node,
            direction,
        },
    })
}
