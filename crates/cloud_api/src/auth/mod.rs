//! Credential models and storage contracts.

pub mod tokens;
