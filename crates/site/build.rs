use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClientToml {
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_status_codes: Option<Vec<u16>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_storage_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    click_delay_ms: Option<u64>,
}

fn validate(config: &ClientToml, path: &str) {
    if let Some(base_url) = &config.base_url {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            panic!("{path}: base_url must be an http(s) origin, found `{base_url}`");
        }
    }
    if let Some(refresh_path) = &config.refresh_path {
        if !refresh_path.starts_with('/') {
            panic!("{path}: refresh_path must start with `/`, found `{refresh_path}`");
        }
    }
    if let Some(codes) = &config.refresh_status_codes {
        if let Some(code) = codes.iter().find(|code| !(400..500).contains(*code)) {
            panic!("{path}: refresh_status_codes must be 4xx statuses, found {code}");
        }
    }
    if config.token_storage_key.as_deref() == Some("") {
        panic!("{path}: token_storage_key cannot be empty");
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("client.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let config = if path.exists() {
        let raw = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
        toml::from_str::<ClientToml>(&raw)
            .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
    } else {
        ClientToml::default()
    };
    validate(&config, &path.display().to_string());

    let json = serde_json::to_string_pretty(&config).expect("serialize client config");
    let generated = format!(
        "/// Build-time generated client configuration JSON.\n\
pub const CLIENT_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("client_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
