//! `localStorage`-backed token store implementation.
//!
//! The whole [`TokenPair`] is serialized into one key, so a refresh rewrites access and refresh
//! token together in a single `setItem` call.

use cloud_api::{TokenPair, TokenStore};

#[derive(Debug, Clone)]
/// Browser token store backed by `window.localStorage`.
pub struct WebTokenStore {
    key: String,
}

impl WebTokenStore {
    /// Creates a store that persists under `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn load_json(&self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            storage.get_item(&self.key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    fn save_json(&self, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(&self.key, raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = raw_json;
            Ok(())
        }
    }
}

impl TokenStore for WebTokenStore {
    fn load(&self) -> Option<TokenPair> {
        let raw = self.load_json()?;
        match serde_json::from_str(&raw) {
            Ok(pair) => Some(pair),
            Err(err) => {
                leptos::logging::warn!("ignoring unreadable token pair in `{}`: {err}", self.key);
                None
            }
        }
    }

    fn save(&self, pair: &TokenPair) -> Result<(), String> {
        let raw = serde_json::to_string(pair).map_err(|e| e.to_string())?;
        self.save_json(&raw)
    }

    fn clear(&self) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .remove_item(&self.key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(())
        }
    }
}
