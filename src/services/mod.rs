pub mod client;
pub mod errors;
pub mod main;
pub mod seed;
pub mod store;

pub use errors::{ServiceError, ServiceResult};
pub use store::ClientStore;
