use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter};

/// Local-state backend keeping the collection in memory, newest first.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    clients: RwLock<Vec<Client>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing collection, kept in the given order.
    pub fn with_clients(clients: Vec<Client>) -> Self {
        Self {
            clients: RwLock::new(clients),
        }
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, Vec<Client>>> {
        self.clients.read().map_err(|_| RepositoryError::LockPoisoned)
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, Vec<Client>>> {
        self.clients.write().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl ClientReader for InMemoryRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        Ok(self.read()?.iter().find(|c| c.id() == id).cloned())
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        Ok(self.read()?.clone())
    }
}

impl ClientWriter for InMemoryRepository {
    fn insert_client(&self, client: &Client) -> RepositoryResult<()> {
        let mut clients = self.write()?;
        if clients.iter().any(|c| c.id() == client.id()) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "client {} already exists",
                client.id()
            )));
        }
        clients.insert(0, client.clone());
        Ok(())
    }

    fn replace_client(&self, client: &Client) -> RepositoryResult<()> {
        let mut clients = self.write()?;
        let slot = clients
            .iter_mut()
            .find(|c| c.id() == client.id())
            .ok_or(RepositoryError::NotFound)?;
        *slot = client.clone();
        Ok(())
    }

    fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        let mut clients = self.write()?;
        let position = clients
            .iter()
            .position(|c| c.id() == id)
            .ok_or(RepositoryError::NotFound)?;
        clients.remove(position);
        Ok(())
    }

    fn replace_all(&self, clients: &[Client]) -> RepositoryResult<()> {
        *self.write()? = clients.to_vec();
        Ok(())
    }
}
