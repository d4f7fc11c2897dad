//! HTTP plumbing: transport contract and the authorized client.

pub mod client;
pub mod transport;
