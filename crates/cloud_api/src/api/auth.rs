//! Sign-in/sign-out against the authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::{auth::tokens::TokenPair, http::transport::HttpRequest, ApiClient, ApiError};

const SIGN_IN_PATH: &str = "/api/auth/signin";

#[derive(Debug, Serialize)]
struct SignInBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JwtResponse {
    #[serde(rename = "type", default = "default_type")]
    token_type: String,
    access_token: String,
    refresh_token: String,
}

fn default_type() -> String {
    crate::DEFAULT_TOKEN_TYPE.to_string()
}

#[derive(Clone)]
/// Session calls that populate or clear the token store.
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Wraps an authorized client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns `true` when a token pair is stored.
    pub fn is_signed_in(&self) -> bool {
        self.client.tokens().load().is_some()
    }

    /// Signs in and stores the returned token pair.
    ///
    /// # Errors
    ///
    /// Returns the request error, [`ApiError::Decode`] for an unexpected body, or
    /// [`ApiError::Storage`] when the pair cannot be stored.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let request = HttpRequest::post(SIGN_IN_PATH)
            .skip_auth_refresh()
            .with_json(&SignInBody {
                username: username.trim(),
                password,
            })?;
        let jwt: JwtResponse = self.client.send_json(request).await?;
        let pair = TokenPair {
            access_token: jwt.access_token,
            refresh_token: jwt.refresh_token,
            token_type: jwt.token_type,
        };
        self.client.tokens().save(&pair).map_err(ApiError::Storage)?;
        Ok(pair)
    }

    /// Forgets the stored token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] when the store rejects the delete.
    pub fn sign_out(&self) -> Result<(), ApiError> {
        self.client.tokens().clear().map_err(ApiError::Storage)
    }
}
