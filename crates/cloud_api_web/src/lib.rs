//! Browser (`wasm32`) implementations of the [`cloud_api`] transport and token-store contracts.
//!
//! - `transport::fetch` sends requests through `window.fetch`.
//! - `storage::local_tokens` keeps the token pair in `localStorage`.
//! - `files` picks, reads and saves files.
//! - `adapters` wires both into the shared [`cloud_api::ApiClient`].
//!
//! Native builds compile the same types with inert behaviour so UI crates stay testable off-wasm.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Factory helpers that assemble the browser client and endpoint wrappers.
pub mod adapters;
/// Browser file picking and download saving.
pub mod files;
/// Token persistence adapters.
pub mod storage;
/// HTTP transport adapters.
pub mod transport;

pub use adapters::{build_api_client, WebServices};
pub use files::{pick_files, save_download};
pub use storage::local_tokens::WebTokenStore;
pub use transport::fetch::FetchTransport;
