//! File records, display formatting and path helpers.

pub mod format;
pub mod path;
pub mod types;
