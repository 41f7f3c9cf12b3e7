//! Mock repository implementations for isolating the store in tests.

use mockall::mock;

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn insert_client(&self, client: &Client) -> RepositoryResult<()>;
        fn replace_client(&self, client: &Client) -> RepositoryResult<()>;
        fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
        fn replace_all(&self, clients: &[Client]) -> RepositoryResult<()>;
    }
}
