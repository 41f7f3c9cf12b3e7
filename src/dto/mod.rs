//! Data transfer objects exchanged with views and the sync backend.

pub mod client;
pub mod main;
pub mod snapshot;
