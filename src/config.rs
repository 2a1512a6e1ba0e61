//! Server configuration, read from an optional RON file.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory by the server binary.
pub const CONFIG_FILE: &str = "branching-game.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding the HTML templates and `style.css`.
    pub static_dir: PathBuf,
    /// Directory served under `/images/`.
    pub images_dir: PathBuf,
    /// tracing filter directive, e.g. "info" or "branching_game=debug".
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8090,
            static_dir: PathBuf::from("static"),
            images_dir: PathBuf::from("images"),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn parse_ron(input: &str) -> Result<ServerConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    pub fn load_from_ron(path: &Path) -> Result<ServerConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// The flag is true when the file was read.
    pub fn load_or_default(path: &Path) -> Result<(ServerConfig, bool), ConfigError> {
        if path.exists() {
            Ok((Self::load_from_ron(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn stylesheet(&self) -> PathBuf {
        self.static_dir.join("style.css")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8090);
        assert_eq!(config.addr().port(), 8090);
        assert_eq!(config.stylesheet(), PathBuf::from("static/style.css"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ServerConfig::parse_ron("(port: 9000)").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.images_dir, PathBuf::from("images"));
    }

    #[test]
    fn full_file() {
        let config = ServerConfig::parse_ron(
            r#"(port: 8100, static_dir: "assets", images_dir: "pics", log_level: "debug")"#,
        )
        .unwrap();
        assert_eq!(config.stylesheet(), PathBuf::from("assets/style.css"));
        assert_eq!(config.images_dir, PathBuf::from("pics"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn bad_fields_rejected() {
        assert!(matches!(
            ServerConfig::parse_ron("(porte: 1)"),
            Err(ConfigError::Ron(_))
        ));
        assert!(ServerConfig::parse_ron("(port: \"eighty\")").is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let (config, from_file) =
            ServerConfig::load_or_default(Path::new("tests/fixtures/no_such_config.ron")).unwrap();
        assert!(!from_file);
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn fixture_file_loads() {
        let (config, from_file) =
            ServerConfig::load_or_default(Path::new("tests/fixtures/server.ron")).unwrap();
        assert!(from_file);
        assert_eq!(config.port, 8091);
    }
}
