//! Snapshot fan-out to view subscriptions.
//!
//! Every subscriber owns a single "latest snapshot" slot plus a wake-up
//! channel of capacity one. Publishing overwrites the slot, so a subscriber
//! that falls behind re-renders once with the newest data instead of once per
//! change.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use thiserror::Error;

use crate::domain::client::Client;

/// Read-only view of the whole collection at a point in time.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Monotonic counter bumped on every publish.
    pub version: u64,
    pub clients: Arc<Vec<Client>>,
}

impl Snapshot {
    pub fn new(version: u64, clients: Vec<Client>) -> Self {
        Self {
            version,
            clients: Arc::new(clients),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BroadcastError {
    #[error("broadcaster lock poisoned")]
    LockPoisoned,
    /// The broadcaster was dropped; no further snapshots will arrive.
    #[error("broadcaster closed")]
    Closed,
}

type SubscriberId = u64;

struct SubscriberState {
    wake: Sender<()>,
    latest: Arc<Mutex<Option<Snapshot>>>,
}

struct BroadcasterState {
    next_subscriber_id: SubscriberId,
    subscribers: BTreeMap<SubscriberId, SubscriberState>,
}

/// Publishes collection snapshots to every live [`Subscription`].
#[derive(Clone)]
pub struct SnapshotBroadcaster {
    inner: Arc<Mutex<BroadcasterState>>,
}

impl Default for SnapshotBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBroadcaster {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BroadcasterState {
                next_subscriber_id: 0,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    /// Registers a listener. `initial` is delivered on the first receive so a
    /// view can render before any mutation happens.
    pub fn subscribe(&self, initial: Option<Snapshot>) -> Result<Subscription, BroadcastError> {
        let mut state = self.lock_state()?;

        let (wake, receiver) = crossbeam::channel::bounded(1);
        let has_initial = initial.is_some();
        let latest = Arc::new(Mutex::new(initial));
        if has_initial {
            // Capacity is one and the channel is brand new.
            let _ = wake.try_send(());
        }

        let id = state.next_subscriber_id;
        state.next_subscriber_id = state.next_subscriber_id.saturating_add(1);
        state.subscribers.insert(
            id,
            SubscriberState {
                wake,
                latest: Arc::clone(&latest),
            },
        );
        log::debug!("subscriber {id} registered");

        Ok(Subscription {
            id,
            receiver,
            latest,
            broadcaster: Arc::downgrade(&self.inner),
        })
    }

    /// Stores `snapshot` for every subscriber and wakes the idle ones.
    pub fn publish(&self, snapshot: Snapshot) -> Result<(), BroadcastError> {
        let mut state = self.lock_state()?;

        let mut dropped = Vec::new();
        for (id, subscriber) in &state.subscribers {
            match subscriber.latest.lock() {
                Ok(mut slot) => *slot = Some(snapshot.clone()),
                Err(_) => {
                    dropped.push(*id);
                    continue;
                }
            }

            match subscriber.wake.try_send(()) {
                // A pending wake-up already covers the overwritten slot.
                Ok(()) | Err(TrySendError::Full(())) => {}
                Err(TrySendError::Disconnected(())) => dropped.push(*id),
            }
        }

        for id in dropped {
            log::debug!("subscriber {id} disconnected");
            state.subscribers.remove(&id);
        }

        Ok(())
    }

    pub fn subscriber_count(&self) -> Result<usize, BroadcastError> {
        Ok(self.lock_state()?.subscribers.len())
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, BroadcasterState>, BroadcastError> {
        self.inner.lock().map_err(|_| BroadcastError::LockPoisoned)
    }
}

/// Listener handle. Dropping it unregisters the listener.
pub struct Subscription {
    id: SubscriberId,
    receiver: Receiver<()>,
    latest: Arc<Mutex<Option<Snapshot>>>,
    broadcaster: Weak<Mutex<BroadcasterState>>,
}

impl Subscription {
    /// Blocks until a snapshot newer than the last one received is available.
    pub fn recv(&self) -> Result<Snapshot, BroadcastError> {
        loop {
            self.receiver.recv().map_err(|_| BroadcastError::Closed)?;
            if let Some(snapshot) = self.take_latest()? {
                return Ok(snapshot);
            }
        }
    }

    /// Like [`Subscription::recv`] but gives up after `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Snapshot>, BroadcastError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(()) => self.take_latest(),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(BroadcastError::Closed),
        }
    }

    /// Returns the pending snapshot, if any, without blocking.
    pub fn try_recv(&self) -> Result<Option<Snapshot>, BroadcastError> {
        match self.receiver.try_recv() {
            Ok(()) => self.take_latest(),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(BroadcastError::Closed),
        }
    }

    /// Explicit teardown; equivalent to dropping the handle.
    pub fn unsubscribe(self) {}

    fn take_latest(&self) -> Result<Option<Snapshot>, BroadcastError> {
        let mut slot = self.latest.lock().map_err(|_| BroadcastError::LockPoisoned)?;
        Ok(slot.take())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.broadcaster.upgrade() else {
            return;
        };
        if let Ok(mut state) = inner.lock() {
            state.subscribers.remove(&self.id);
            log::debug!("subscriber {} unregistered", self.id);
        }
    }
}
