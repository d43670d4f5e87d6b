//! Change notification
//!
//! A subscribe/publish registry keyed by content URI. The provider calls
//! `notify_change` after every successful mutation; each subscription whose
//! address overlaps the changed URI receives that URI on its channel.
//!
//! Fan-out is synchronous and the order across subscribers is unspecified.
//! Dropping a `Subscription` removes its registration.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;
use tracing::trace;

use crate::uri::{Address, ContentUri};

/// Identifies one registered subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Observer {
    uri: ContentUri,
    address: Option<Address>,
    sender: Sender<ContentUri>,
}

impl Observer {
    /// Unrecognised URIs only ever match themselves
    fn wants(&self, changed: &ContentUri, changed_address: Option<Address>) -> bool {
        match (self.address, changed_address) {
            (Some(mine), Some(theirs)) => mine.overlaps(&theirs),
            _ => self.uri == *changed,
        }
    }
}

type Registry = Mutex<HashMap<SubscriptionId, Observer>>;

/// Registry of change subscriptions
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Arc<Registry>,
    next_id: AtomicU64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in changes overlapping `uri`
    pub fn subscribe(&self, uri: &ContentUri) -> Subscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = crossbeam_channel::unbounded();

        self.observers.lock().insert(
            id,
            Observer {
                uri: uri.clone(),
                address: Address::resolve(uri),
                sender,
            },
        );
        trace!("Subscription {:?} registered for {}", id, uri);

        Subscription {
            id,
            uri: uri.clone(),
            receiver,
            registry: Arc::downgrade(&self.observers),
        }
    }

    /// Stop delivering to a subscription
    ///
    /// Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        self.observers.lock().remove(&subscription.id).is_some()
    }

    /// Signal every overlapping subscription that `uri` changed
    ///
    /// Returns how many subscriptions were signalled.
    pub fn notify_change(&self, uri: &ContentUri) -> usize {
        let changed_address = Address::resolve(uri);
        let mut observers = self.observers.lock();
        let mut delivered = 0;

        observers.retain(|_, observer| {
            if !observer.wants(uri, changed_address) {
                return true;
            }
            match observer.sender.send(uri.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                // receiver dropped
                Err(_) => false,
            }
        });

        trace!("Notified {} subscription(s) of change at {}", delivered, uri);
        delivered
    }

    /// Number of live registrations
    pub fn subscriber_count(&self) -> usize {
        self.observers.lock().len()
    }
}

/// Handle returned by `subscribe`; receives the URIs that changed
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    uri: ContentUri,
    receiver: Receiver<ContentUri>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The URI this subscription watches
    pub fn uri(&self) -> &ContentUri {
        &self.uri
    }

    /// Next pending change, without blocking
    pub fn try_next(&self) -> Option<ContentUri> {
        match self.receiver.try_recv() {
            Ok(uri) => Some(uri),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next change
    pub fn next_timeout(&self, timeout: Duration) -> Option<ContentUri> {
        match self.receiver.recv_timeout(timeout) {
            Ok(uri) => Some(uri),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// All pending changes
    pub fn drain(&self) -> Vec<ContentUri> {
        self.receiver.try_iter().collect()
    }

    /// Whether any change is waiting
    pub fn has_pending(&self) -> bool {
        !self.receiver.is_empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().remove(&self.id);
        }
    }
}
