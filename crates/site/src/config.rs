//! Client configuration compiled from `client.toml`.

use cloud_api::ClientConfig;

include!(concat!(env!("OUT_DIR"), "/client_config_generated.rs"));

/// Returns the compiled client configuration, or the defaults if it cannot be read.
pub fn client_config() -> ClientConfig {
    ClientConfig::from_json(CLIENT_CONFIG_JSON).unwrap_or_else(|err| {
        leptos::logging::warn!("{err}; using default client config");
        ClientConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_config_parses() {
        let config = ClientConfig::from_json(CLIENT_CONFIG_JSON).expect("compiled config");
        assert!(config.base_url.starts_with("http"));
        assert!(config.is_refresh_status(401));
        assert_eq!(client_config(), config);
    }
}
