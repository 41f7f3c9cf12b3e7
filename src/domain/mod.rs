//! Domain aggregates exposed by the client store.

pub mod client;
pub mod timeline;
pub mod types;
