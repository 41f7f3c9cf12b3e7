//! Storage backends for the client collection.
//!
//! The store talks to storage only through [`ClientReader`] and
//! [`ClientWriter`]; every write is a whole-record replacement so backends
//! never need to merge fields.

use crate::db::DbPool;
use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use memory::InMemoryRepository;

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// Full collection in store-native order: most recently inserted first,
    /// or exactly the order of the last [`ClientWriter::replace_all`] snapshot.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn insert_client(&self, client: &Client) -> RepositoryResult<()>;
    /// Fails with [`errors::RepositoryError::NotFound`] for unknown ids.
    fn replace_client(&self, client: &Client) -> RepositoryResult<()>;
    /// Fails with [`errors::RepositoryError::NotFound`] for unknown ids.
    fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
    /// Swaps the whole collection for an authoritative snapshot. Listing
    /// afterwards yields the snapshot's order regardless of `created_at`.
    fn replace_all(&self, clients: &[Client]) -> RepositoryResult<()>;
}

/// Object-safe bundle used by the store.
pub trait ClientRepository: ClientReader + ClientWriter + Send + Sync {}

impl<T> ClientRepository for T where T: ClientReader + ClientWriter + Send + Sync {}

/// Diesel-backed repository over the SQLite pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}
