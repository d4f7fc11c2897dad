//! Typed wrappers over the REST endpoints the browser calls.

pub mod auth;
pub mod storage;
