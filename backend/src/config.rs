//! Server configuration loaded from `config.json`.
//!
//! The file holds the public section the browser sees (`backend`, `limits`)
//! next to server-only sections (`server`, `database`, `auth`). A missing or
//! unreadable file is not fatal: defaults are used and a warning is logged.
//! `FLUENT_HOST`, `FLUENT_PORT` and `FLUENT_DB` override the file.

use common::config::{BackendConfig, Limits, PublicConfig};
use log::{info, warn};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH_VAR: &str = "FLUENT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub server: ListenConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
    /// Opens the workbench in the default browser once the server is up.
    pub open_browser: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthConfig {
    pub session_hours: i64,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            open_browser: false,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "fluent.sqlite".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { session_hours: 24 }
    }
}

impl ServerConfig {
    pub fn load() -> Self {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path));
        config.apply_env();
        config
    }

    pub fn from_file(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<ServerConfig>(&raw) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Invalid configuration in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(host) = env::var("FLUENT_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("FLUENT_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!("Invalid FLUENT_PORT value '{}': {}", port, e),
            }
        }
        if let Ok(db) = env::var("FLUENT_DB") {
            self.database.path = db;
        }
    }

    /// The part served at `GET /config.json`.
    pub fn public(&self) -> PublicConfig {
        PublicConfig::resolve::<()>(Ok(PublicConfig {
            backend: self.backend.clone(),
            limits: self.limits.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_all_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "backend": {{"baseUrl": "https://fluent.example.com"}},
                "limits": {{"freeRequests": 3, "maxFileSizeMb": 25}},
                "server": {{"host": "0.0.0.0", "port": 9000}},
                "database": {{"path": "/var/lib/fluent.sqlite"}},
                "auth": {{"sessionHours": 2}}
            }}"#
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path());
        assert_eq!(config.server.port, 9000);
        assert!(!config.server.open_browser);
        assert_eq!(config.database.path, "/var/lib/fluent.sqlite");
        assert_eq!(config.auth.session_hours, 2);
        assert_eq!(config.public().limits.max_file_size_mb, 25);
        assert_eq!(config.public().backend.base_url, "https://fluent.example.com");
    }

    #[test]
    fn partial_sections_keep_the_other_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "backend": {{"baseUrl": "https://api.fluent.example"}},
                "limits": {{"freeRequests": 2}},
                "server": {{"port": 9000}},
                "database": {{}}
            }}"#
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path());
        assert_eq!(config.backend.base_url, "https://api.fluent.example");
        assert_eq!(config.limits.free_requests, 2);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database, DatabaseConfig::default());
        assert_eq!(config.auth.session_hours, 24);
    }

    #[test]
    fn missing_or_broken_file_means_defaults() {
        assert_eq!(
            ServerConfig::from_file(Path::new("/nonexistent/fluent/config.json")),
            ServerConfig::default()
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert_eq!(ServerConfig::from_file(file.path()), ServerConfig::default());
    }

    #[test]
    fn public_part_hides_server_sections() {
        let json = serde_json::to_value(ServerConfig::default().public()).unwrap();
        assert!(json.get("database").is_none());
        assert_eq!(json["backend"]["baseUrl"], "http://localhost:8000");
        assert_eq!(json["limits"]["freeRequests"], 5);
    }
}
