use std::rc::Rc;

use cloud_api::{ApiClient, AuthApi, ClientConfig, StorageApi};

use crate::{FetchTransport, WebTokenStore};

/// Builds the application-wide [`ApiClient`] over `fetch` and `localStorage`.
pub fn build_api_client(config: ClientConfig) -> ApiClient {
    let tokens = WebTokenStore::new(config.token_storage_key.clone());
    ApiClient::new(config, Rc::new(FetchTransport), Rc::new(tokens))
}

#[derive(Clone)]
/// Endpoint wrappers sharing one browser [`ApiClient`].
pub struct WebServices {
    /// File storage endpoints.
    pub storage: StorageApi,
    /// Session endpoints.
    pub auth: AuthApi,
}

impl WebServices {
    /// Wires the endpoint wrappers for a config.
    pub fn new(config: ClientConfig) -> Self {
        let client = build_api_client(config);
        Self {
            storage: StorageApi::new(client.clone()),
            auth: AuthApi::new(client),
        }
    }

    /// Configuration shared by the wrappers.
    pub fn config(&self) -> &ClientConfig {
        self.storage.client().config()
    }
}
