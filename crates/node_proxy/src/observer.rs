// Copyright (C) 2015-2025 The Neo Project.
//
// observer.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Observer registrations.
//!
//! Listeners are held weakly: the proxy never keeps a collaborator alive.
//! Notifications are delivered synchronously on the worker thread.

use crate::scheduler::panic_message;
use dynex_core::{BlockHeaderInfo, Hash};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};
use tracing::warn;

/// Chain-update listener. Every method defaults to a no-op.
pub trait NodeObserver: Send + Sync {
    fn peer_count_updated(&self, _count: usize) {}

    /// The node's local chain moved to a new top block.
    fn local_blockchain_updated(&self, _height: u32) {}

    /// The node learnt of a higher block on the network.
    fn last_known_block_height_updated(&self, _height: u32) {}

    fn block_header_updated(&self, _header: &BlockHeaderInfo) {}

    /// Pool transactions that appeared and disappeared since the previous tick.
    fn pool_changed(&self, _added: &[Hash], _removed: &[Hash]) {}
}

/// Connection state listener.
pub trait ConnectivityObserver: Send + Sync {
    fn connection_status_updated(&self, connected: bool);
}

/// Ordered set of weakly held observers.
///
/// [`ObserverManager::remove`] returns only once no delivery to the removed
/// observer is in flight, unless it is called from inside a notification.
pub struct ObserverManager<O: ?Sized> {
    observers: Mutex<Vec<Weak<O>>>,
    delivery: Mutex<()>,
    delivering_thread: Mutex<Option<ThreadId>>,
}

impl<O: ?Sized> Default for ObserverManager<O> {
    fn default() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
            delivery: Mutex::new(()),
            delivering_thread: Mutex::new(None),
        }
    }
}

fn same_observer<O: ?Sized>(registered: &Weak<O>, observer: &Arc<O>) -> bool {
    registered.as_ptr() as *const () == Arc::as_ptr(observer) as *const ()
}

impl<O: ?Sized> ObserverManager<O> {
    /// Registers `observer`; returns `false` when it is already registered.
    pub fn add(&self, observer: &Arc<O>) -> bool {
        let mut observers = self.observers.lock();
        observers.retain(|o| o.strong_count() > 0);
        if observers.iter().any(|o| same_observer(o, observer)) {
            return false;
        }
        observers.push(Arc::downgrade(observer));
        true
    }

    /// Unregisters `observer`; returns `false` when it was not registered.
    pub fn remove(&self, observer: &Arc<O>) -> bool {
        let removed = {
            let mut observers = self.observers.lock();
            let before = observers.len();
            observers.retain(|o| !same_observer(o, observer));
            observers.len() != before
        };

        if removed && *self.delivering_thread.lock() != Some(thread::current().id()) {
            // Wait out a delivery that may still hold the observer.
            drop(self.delivery.lock());
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.observers
            .lock()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.observers.lock().clear();
    }

    /// Calls `f` on every live observer in registration order.
    ///
    /// A panicking observer is logged and skipped; the remaining observers
    /// are still notified.
    pub fn notify<F: Fn(&O)>(&self, f: F) {
        let _delivery = self.delivery.lock();
        let observers: Vec<Arc<O>> = {
            let mut observers = self.observers.lock();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        if observers.is_empty() {
            return;
        }

        let _delivering = DeliveringThread::enter(&self.delivering_thread);
        for observer in &observers {
            if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| f(observer))) {
                warn!(reason = %panic_message(panic.as_ref()), "observer panicked");
            }
        }
    }
}

/// Marks the current thread as delivering until dropped.
struct DeliveringThread<'a>(&'a Mutex<Option<ThreadId>>);

impl<'a> DeliveringThread<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>) -> Self {
        *slot.lock() = Some(thread::current().id());
        Self(slot)
    }
}

impl Drop for DeliveringThread<'_> {
    fn drop(&mut self) {
        *self.0.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        peers: AtomicUsize,
    }

    impl NodeObserver for Counter {
        fn peer_count_updated(&self, count: usize) {
            self.peers.store(count, Ordering::SeqCst);
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let manager: ObserverManager<dyn NodeObserver> = ObserverManager::default();
        let observer: Arc<dyn NodeObserver> = Arc::new(Counter::default());
        assert!(manager.add(&observer));
        assert!(!manager.add(&observer));
        assert_eq!(manager.len(), 1);
        assert!(manager.remove(&observer));
        assert!(!manager.remove(&observer));
        assert!(manager.is_empty());
    }

    #[test]
    fn removed_observer_is_not_notified() {
        let manager: ObserverManager<dyn NodeObserver> = ObserverManager::default();
        let counter = Arc::new(Counter::default());
        let observer: Arc<dyn NodeObserver> = counter.clone();
        manager.add(&observer);

        manager.notify(|o| o.peer_count_updated(4));
        assert_eq!(counter.peers.load(Ordering::SeqCst), 4);

        manager.remove(&observer);
        manager.notify(|o| o.peer_count_updated(9));
        assert_eq!(counter.peers.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn dropped_observer_is_pruned() {
        let manager: ObserverManager<dyn NodeObserver> = ObserverManager::default();
        let observer: Arc<dyn NodeObserver> = Arc::new(Counter::default());
        manager.add(&observer);
        drop(observer);
        assert_eq!(manager.len(), 0);
        manager.notify(|o| o.peer_count_updated(1));
    }

    struct SelfRemoving {
        manager: Arc<ObserverManager<dyn ConnectivityObserver>>,
        me: Mutex<Option<Arc<dyn ConnectivityObserver>>>,
        calls: AtomicUsize,
    }

    impl ConnectivityObserver for SelfRemoving {
        fn connection_status_updated(&self, _connected: bool) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(me) = self.me.lock().take() {
                assert!(self.manager.remove(&me));
            }
        }
    }

    struct Panicking;

    impl NodeObserver for Panicking {
        fn peer_count_updated(&self, _count: usize) {
            panic!("observer failure");
        }
    }

    #[test]
    fn panicking_observer_does_not_stop_delivery() {
        let manager: ObserverManager<dyn NodeObserver> = ObserverManager::default();
        let panicking: Arc<dyn NodeObserver> = Arc::new(Panicking);
        let counter = Arc::new(Counter::default());
        let observer: Arc<dyn NodeObserver> = counter.clone();
        manager.add(&panicking);
        manager.add(&observer);

        manager.notify(|o| o.peer_count_updated(6));
        assert_eq!(counter.peers.load(Ordering::SeqCst), 6);
        assert!(manager.delivering_thread.lock().is_none());

        // Removal from another thread must not wait on a stale delivery mark.
        let removed = thread::scope(|scope| scope.spawn(|| manager.remove(&panicking)).join());
        assert!(removed.unwrap());
    }

    #[test]
    fn observer_may_remove_itself_during_delivery() {
        let manager: Arc<ObserverManager<dyn ConnectivityObserver>> = Arc::default();
        let observer = Arc::new(SelfRemoving {
            manager: manager.clone(),
            me: Mutex::new(None),
            calls: AtomicUsize::new(0),
        });
        let handle: Arc<dyn ConnectivityObserver> = observer.clone();
        *observer.me.lock() = Some(handle.clone());
        manager.add(&handle);

        manager.notify(|o| o.connection_status_updated(true));
        manager.notify(|o| o.connection_status_updated(false));
        assert_eq!(observer.calls.load(Ordering::SeqCst), 1);
    }
}
