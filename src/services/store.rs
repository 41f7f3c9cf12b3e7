//! The single owned store of client records.
//!
//! Writers are serialised through one mutex; after each successful mutation
//! the full collection is re-read and pushed to every subscription.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::broadcast::{Snapshot, SnapshotBroadcaster, Subscription};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::timeline::{COMPLETED_ICON, CREATED_ICON, TimelineEntry};
use crate::domain::types::{ClientId, StatusNote, TimelineIcon};
use crate::locale::{Clock, DisplayLocale, PtBr, SystemClock};
use crate::repository::ClientRepository;
use crate::services::{ServiceError, ServiceResult};

pub struct ClientStore {
    repo: Arc<dyn ClientRepository>,
    broadcaster: SnapshotBroadcaster,
    locale: Arc<dyn DisplayLocale>,
    clock: Arc<dyn Clock>,
    /// Held for the duration of every mutation. Guards the snapshot version.
    writer: Mutex<u64>,
}

impl ClientStore {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self {
            repo,
            broadcaster: SnapshotBroadcaster::new(),
            locale: Arc::new(PtBr),
            clock: Arc::new(SystemClock),
            writer: Mutex::new(0),
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Arc<dyn DisplayLocale>) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn locale(&self) -> &dyn DisplayLocale {
        self.locale.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Opens a new active record with a single timeline entry dated
    /// `start_date`, placed at the head of the collection.
    pub fn create(&self, new_client: NewClient) -> ServiceResult<Client> {
        let mut version = self.lock_writer()?;

        let entry = TimelineEntry::new(
            new_client.start_date,
            self.locale.long_date(new_client.start_date),
            new_client.initial_note.clone(),
        )
        .with_icon(TimelineIcon::new(CREATED_ICON)?);
        let client = Client::open(ClientId::new(), new_client, entry, self.clock.now());

        self.repo.insert_client(&client).map_err(|err| {
            log::error!("Failed to insert client {}: {err}", client.id());
            ServiceError::from(err)
        })?;
        log::info!("Created client {}", client.id());

        self.publish(&mut version);
        Ok(client)
    }

    /// Absence is not an error.
    pub fn get_by_id(&self, id: ClientId) -> ServiceResult<Option<Client>> {
        Ok(self.repo.get_client_by_id(id)?)
    }

    /// Full collection in store-native order.
    pub fn list_all(&self) -> ServiceResult<Vec<Client>> {
        Ok(self.repo.list_clients()?)
    }

    /// Prepends a note dated today to an active record.
    pub fn append_timeline_update(
        &self,
        id: ClientId,
        description: &str,
    ) -> ServiceResult<Client> {
        let note = StatusNote::new(description)?;
        let mut version = self.lock_writer()?;

        let mut client = self.require(id)?;
        client.record_update(self.entry_for_today(note))?;
        self.save(&client)?;
        log::info!("Appended timeline update to client {id}");

        self.publish(&mut version);
        Ok(client)
    }

    /// Closes an active record with the locale's completion note.
    ///
    /// A second call fails with [`ServiceError::InvalidState`] instead of
    /// appending another completion entry.
    pub fn mark_completed(&self, id: ClientId) -> ServiceResult<Client> {
        let note = StatusNote::new(self.locale.completion_note())?;
        let mut version = self.lock_writer()?;

        let mut client = self.require(id)?;
        let entry = self
            .entry_for_today(note)
            .with_icon(TimelineIcon::new(COMPLETED_ICON)?);
        client.complete(entry)?;
        self.save(&client)?;
        log::info!("Marked client {id} as completed");

        self.publish(&mut version);
        Ok(client)
    }

    /// Replaces the provided descriptive fields of an active record.
    pub fn update_fields(&self, id: ClientId, updates: &UpdateClient) -> ServiceResult<Client> {
        let mut version = self.lock_writer()?;

        let mut client = self.require(id)?;
        if !client.apply_update(updates)? {
            return Ok(client);
        }
        self.save(&client)?;
        log::info!("Updated client {id}");

        self.publish(&mut version);
        Ok(client)
    }

    /// Removes a completed record for good.
    pub fn delete_client(&self, id: ClientId) -> ServiceResult<()> {
        let mut version = self.lock_writer()?;

        let client = self.require(id)?;
        client.ensure_deletable()?;
        self.repo.delete_client(id).map_err(|err| {
            log::error!("Failed to delete client {id}: {err}");
            ServiceError::from(err)
        })?;
        log::info!("Deleted client {id}");

        self.publish(&mut version);
        Ok(())
    }

    /// Registers a listener that first receives the current collection and
    /// then every later change.
    pub fn subscribe(&self) -> ServiceResult<Subscription> {
        let version = self.lock_writer()?;
        let current = Snapshot::new(*version, self.repo.list_clients()?);
        Ok(self.broadcaster.subscribe(Some(current))?)
    }

    /// Replaces the whole collection with a snapshot pushed by the backend.
    pub fn apply_remote_snapshot(&self, clients: Vec<Client>) -> ServiceResult<()> {
        ensure_unique_ids(&clients)?;

        let mut version = self.lock_writer()?;
        self.replace_collection(&mut version, &clients)
    }

    /// Like [`ClientStore::apply_remote_snapshot`], but only when the
    /// collection is empty. The emptiness check and the write share one
    /// critical section. Returns whether the snapshot was applied.
    pub fn apply_remote_snapshot_if_empty(&self, clients: Vec<Client>) -> ServiceResult<bool> {
        ensure_unique_ids(&clients)?;

        let mut version = self.lock_writer()?;
        if !self.repo.list_clients()?.is_empty() {
            return Ok(false);
        }
        self.replace_collection(&mut version, &clients)?;
        Ok(true)
    }

    fn replace_collection(&self, version: &mut u64, clients: &[Client]) -> ServiceResult<()> {
        self.repo.replace_all(clients).map_err(|err| {
            log::error!("Failed to apply remote snapshot: {err}");
            ServiceError::from(err)
        })?;
        log::info!("Applied remote snapshot with {} clients", clients.len());

        self.publish(version);
        Ok(())
    }

    fn lock_writer(&self) -> ServiceResult<MutexGuard<'_, u64>> {
        self.writer
            .lock()
            .map_err(|_| ServiceError::Internal("store writer lock poisoned".to_string()))
    }

    fn require(&self, id: ClientId) -> ServiceResult<Client> {
        self.repo.get_client_by_id(id)?.ok_or(ServiceError::NotFound)
    }

    fn save(&self, client: &Client) -> ServiceResult<()> {
        self.repo.replace_client(client).map_err(|err| {
            log::error!("Failed to save client {}: {err}", client.id());
            ServiceError::from(err)
        })
    }

    fn entry_for_today(&self, note: StatusNote) -> TimelineEntry {
        let today = self.clock.today();
        TimelineEntry::new(today, self.locale.long_date(today), note)
    }

    /// The mutation has already been committed, so failures here are only
    /// logged; subscribers catch up on the next publish.
    fn publish(&self, version: &mut u64) {
        *version += 1;
        let clients = match self.repo.list_clients() {
            Ok(clients) => clients,
            Err(err) => {
                log::error!("Failed to load snapshot {version}: {err}");
                return;
            }
        };
        if let Err(err) = self.broadcaster.publish(Snapshot::new(*version, clients)) {
            log::error!("Failed to publish snapshot {version}: {err}");
        }
    }
}

fn ensure_unique_ids(clients: &[Client]) -> ServiceResult<()> {
    let mut seen = HashSet::with_capacity(clients.len());
    match clients.iter().find(|c| !seen.insert(c.id())) {
        Some(duplicate) => Err(ServiceError::Validation(format!(
            "snapshot contains client {} twice",
            duplicate.id()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::client::ClientStatus;
    use crate::repository::InMemoryRepository;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn new_client() -> NewClient {
        NewClient::try_new(
            "Pedro Martins",
            "Marcenaria Completa",
            NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
            "Visita realizada para medição",
        )
        .unwrap()
    }

    #[test]
    fn failed_insert_is_surfaced_and_not_published() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().returning(|| Ok(Vec::new()));
        repo.expect_insert_client()
            .returning(|_| Err(RepositoryError::ConnectionError("offline".into())));

        let store = ClientStore::new(Arc::new(repo));
        let subscription = store.subscribe().unwrap();
        subscription.try_recv().unwrap();

        let err = store.create(new_client()).unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
        assert!(subscription.try_recv().unwrap().is_none());
    }

    #[test]
    fn missing_record_maps_to_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(None));
        repo.expect_replace_client().never();

        let store = ClientStore::new(Arc::new(repo));
        let err = store
            .append_timeline_update(ClientId::new(), "Nova etapa")
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn blank_note_is_rejected_before_touching_storage() {
        let repo = MockRepository::new();
        let store = ClientStore::new(Arc::new(repo));
        let err = store
            .append_timeline_update(ClientId::new(), "   ")
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn completed_record_is_not_saved_again() {
        let fixture = ClientStore::new(Arc::new(InMemoryRepository::new()));
        let created = fixture.create(new_client()).unwrap();
        let completed = fixture.mark_completed(created.id()).unwrap();
        assert_eq!(completed.status(), ClientStatus::Completed);

        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(move |_| Ok(Some(completed.clone())));
        repo.expect_replace_client().never();

        let store = ClientStore::new(Arc::new(repo));
        let err = store.mark_completed(created.id()).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[test]
    fn conditional_snapshot_skips_populated_store() {
        let store = ClientStore::new(Arc::new(InMemoryRepository::new()));
        let local = store.create(new_client()).unwrap();
        let subscription = store.subscribe().unwrap();
        subscription.try_recv().unwrap();

        let remote = ClientStore::new(Arc::new(InMemoryRepository::new()));
        let incoming = remote.create(new_client()).unwrap();

        let applied = store
            .apply_remote_snapshot_if_empty(vec![incoming.clone()])
            .unwrap();
        assert!(!applied);
        assert_eq!(store.list_all().unwrap(), vec![local]);
        assert!(subscription.try_recv().unwrap().is_none());

        let empty = ClientStore::new(Arc::new(InMemoryRepository::new()));
        assert!(empty.apply_remote_snapshot_if_empty(vec![incoming.clone()]).unwrap());
        assert_eq!(empty.list_all().unwrap(), vec![incoming]);
    }
}
