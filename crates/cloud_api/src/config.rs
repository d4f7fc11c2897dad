//! Client configuration shared by the HTTP layer and the browser UI.

use serde::{Deserialize, Serialize};

/// Default REST backend origin.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Default token-refresh endpoint.
pub const DEFAULT_REFRESH_PATH: &str = "/api/auth/refresh";
/// Default `localStorage` key holding the serialized token pair.
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "cloudfiles.auth.tokens.v1";
/// Default window in which a second click counts as a double click.
pub const DEFAULT_CLICK_DELAY_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Runtime settings for the API client and file browser.
///
/// Every field has a default, so a partial (or empty) config document is valid.
pub struct ClientConfig {
    /// Backend origin prepended to every request path.
    pub base_url: String,
    /// Path of the token-refresh endpoint.
    pub refresh_path: String,
    /// Response statuses that trigger a token refresh.
    pub refresh_status_codes: Vec<u16>,
    /// Storage key for the persisted token pair.
    pub token_storage_key: String,
    /// Single/double click disambiguation window.
    pub click_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            refresh_status_codes: vec![401, 403],
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            click_delay_ms: DEFAULT_CLICK_DELAY_MS,
        }
    }
}

impl ClientConfig {
    /// Parses a config document produced by the build script.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("invalid client config: {e}"))
    }

    /// Returns `true` when a response status should trigger a token refresh.
    pub fn is_refresh_status(&self, status: u16) -> bool {
        self.refresh_status_codes.contains(&status)
    }

    /// Joins the base URL with an absolute request path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config =
            ClientConfig::from_json(r#"{"base_url":"https://files.example.test/"}"#).expect("parse");
        assert_eq!(
            config,
            ClientConfig {
                base_url: "https://files.example.test/".to_string(),
                ..ClientConfig::default()
            }
        );
        assert_eq!(
            config.url_for("/api/files"),
            "https://files.example.test/api/files"
        );
        assert_eq!(config.url_for("api/files"), "https://files.example.test/api/files");
    }

    #[test]
    fn refresh_statuses_default_to_unauthorized_and_forbidden() {
        let config = ClientConfig::default();
        assert!(config.is_refresh_status(401));
        assert!(config.is_refresh_status(403));
        assert!(!config.is_refresh_status(404));
    }

    #[test]
    fn malformed_config_is_rejected() {
        let err = ClientConfig::from_json("{").expect_err("malformed");
        assert!(err.starts_with("invalid client config"));
    }
}
