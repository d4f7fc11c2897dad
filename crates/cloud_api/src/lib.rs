//! Typed client contracts for the Cloud Files REST backend.
//!
//! This crate is the target-neutral boundary between the browser UI and the storage server. It
//! owns the file/directory records, display formatting, the token pair and its storage contract,
//! the authorized [`ApiClient`] with transparent token refresh, and typed endpoint wrappers.
//! Browser implementations of the transport and token storage live in `cloud_api_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod auth;
pub mod config;
mod error;
pub mod files;
pub mod http;

pub use api::auth::AuthApi;
pub use api::storage::{validate_entry_name, MoveTarget, StorageApi, PARENT_MOVE_TARGET};
pub use auth::tokens::{MemoryTokenStore, TokenPair, TokenStore, DEFAULT_TOKEN_TYPE};
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_CLICK_DELAY_MS, DEFAULT_REFRESH_PATH,
    DEFAULT_TOKEN_STORAGE_KEY,
};
pub use error::ApiError;
pub use files::format::{
    format_last_modified, format_last_modified_local, format_size, SIZE_OVERFLOW_LABEL,
};
pub use files::path::{is_root, join_path, normalize_path, parent_path};
pub use files::types::{sort_entries, FileContent, FileKind, FileRecord, PARENT_ENTRY_NAME};
pub use http::client::ApiClient;
pub use http::transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MultipartForm, RequestBody,
    ResponseKind, TransportFuture, AUTHORIZATION_HEADER,
};
