//! Public runtime configuration.
//!
//! The server reads this from `config.json` and republishes it at
//! `GET /config.json`; the browser fetches it once on start. Both sides fall
//! back to [`PublicConfig::default`] when the document is missing or broken.

use serde::{Deserialize, Serialize};

/// Analysis backend origin used when no configuration could be loaded.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_FREE_REQUESTS: u32 = 5;
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    /// Analyses a signed-in, non-premium account may run.
    #[serde(default = "default_free_requests")]
    pub free_requests: u32,
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_free_requests() -> u32 {
    DEFAULT_FREE_REQUESTS
}

fn default_max_file_size_mb() -> u64 {
    DEFAULT_MAX_FILE_SIZE_MB
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            free_requests: DEFAULT_FREE_REQUESTS,
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

impl PublicConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Picks the loaded configuration, or the defaults when loading failed or
    /// produced an empty backend origin. Never fails.
    pub fn resolve<E>(loaded: Result<Self, E>) -> Self {
        match loaded {
            Ok(config) if !config.backend.base_url.trim().is_empty() => config,
            _ => Self::default(),
        }
    }
}

impl BackendConfig {
    /// Joins the backend origin and `path` with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Limits {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_document() {
        let config = PublicConfig::from_json_str(
            r#"{"backend":{"baseUrl":"https://api.example.com"},"limits":{"freeRequests":3}}"#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://api.example.com");
        assert_eq!(config.limits.free_requests, 3);
        assert_eq!(config.limits.max_file_size_mb, DEFAULT_MAX_FILE_SIZE_MB);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = PublicConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PublicConfig::default());
    }

    #[test]
    fn resolve_falls_back_on_error() {
        let resolved = PublicConfig::resolve(PublicConfig::from_json_str("not json"));
        assert_eq!(resolved.backend.base_url, DEFAULT_BACKEND_URL);

        let resolved = PublicConfig::resolve::<()>(Err(()));
        assert_eq!(resolved, PublicConfig::default());
    }

    #[test]
    fn resolve_rejects_blank_origin() {
        let blank = PublicConfig {
            backend: BackendConfig {
                base_url: "  ".to_string(),
            },
            limits: Limits::default(),
        };
        assert_eq!(
            PublicConfig::resolve::<()>(Ok(blank)).backend.base_url,
            DEFAULT_BACKEND_URL
        );
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let backend = BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
        };
        assert_eq!(backend.endpoint("/predict"), "http://localhost:8000/predict");
        assert_eq!(
            backend.endpoint("download-report/abc"),
            "http://localhost:8000/download-report/abc"
        );
    }
}
