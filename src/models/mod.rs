//! Database and configuration models.

pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod timeline_entry;
