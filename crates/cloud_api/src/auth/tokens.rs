//! Access/refresh token pair and its persistence contract.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

/// Token type used when the server does not name one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Credentials held by the browser between page loads.
pub struct TokenPair {
    /// Short-lived token sent with every request.
    pub access_token: String,
    /// Long-lived token exchanged for a new access token.
    pub refresh_token: String,
    /// Authorization scheme, usually `Bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl TokenPair {
    /// Value of the `Authorization` header for this pair.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Persistence for the current [`TokenPair`].
///
/// Implementations store the pair as a single value, so every write replaces the whole pair.
pub trait TokenStore {
    /// Loads the stored pair.
    fn load(&self) -> Option<TokenPair>;

    /// Replaces the stored pair.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage rejects the write.
    fn save(&self, pair: &TokenPair) -> Result<(), String>;

    /// Removes any stored pair.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage rejects the delete.
    fn clear(&self) -> Result<(), String>;

    /// Returns the `Authorization` header value for the stored pair.
    fn authorization_header(&self) -> Option<String> {
        self.load().map(|pair| pair.authorization_header())
    }

    /// Returns the stored refresh token.
    fn refresh_token(&self) -> Option<String> {
        self.load().map(|pair| pair.refresh_token)
    }

    /// Swaps in a refreshed access token (and scheme) while keeping the refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error when no pair is stored or the write fails.
    fn update_access_token(&self, token_type: &str, access_token: &str) -> Result<(), String> {
        let mut pair = self
            .load()
            .ok_or_else(|| "no token pair stored".to_string())?;
        pair.access_token = access_token.to_string();
        if !token_type.is_empty() {
            pair.token_type = token_type.to_string();
        }
        self.save(&pair)
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory token store for tests and non-browser targets.
pub struct MemoryTokenStore {
    inner: Rc<RefCell<Option<TokenPair>>>,
}

impl MemoryTokenStore {
    /// Creates a store pre-populated with `pair`.
    pub fn with_pair(pair: TokenPair) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Some(pair))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<TokenPair> {
        self.inner.borrow().clone()
    }

    fn save(&self, pair: &TokenPair) -> Result<(), String> {
        *self.inner.borrow_mut() = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        self.inner.borrow_mut().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            token_type: "Bearer".to_string(),
        }
    }

    #[test]
    fn authorization_header_joins_type_and_token() {
        let store = MemoryTokenStore::with_pair(pair());
        assert_eq!(
            store.authorization_header(),
            Some("Bearer access-1".to_string())
        );
        assert_eq!(MemoryTokenStore::default().authorization_header(), None);
    }

    #[test]
    fn update_access_token_keeps_refresh_token() {
        let store = MemoryTokenStore::with_pair(pair());
        store
            .update_access_token("Token", "access-2")
            .expect("update");
        assert_eq!(
            store.load(),
            Some(TokenPair {
                access_token: "access-2".to_string(),
                refresh_token: "refresh-1".to_string(),
                token_type: "Token".to_string(),
            })
        );
    }

    #[test]
    fn update_without_stored_pair_fails() {
        let store = MemoryTokenStore::default();
        assert_eq!(
            store.update_access_token("Bearer", "x"),
            Err("no token pair stored".to_string())
        );
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let parsed: TokenPair =
            serde_json::from_str(r#"{"access_token":"a","refresh_token":"r"}"#).expect("parse");
        assert_eq!(parsed.token_type, DEFAULT_TOKEN_TYPE);
    }

    #[test]
    fn clear_removes_pair() {
        let store = MemoryTokenStore::with_pair(pair());
        store.clear().expect("clear");
        assert_eq!(store.load(), None);
    }
}
