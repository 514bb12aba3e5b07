//! StateCell, the subscribe/replace primitive the bridge observes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use tracing::debug;

type Callback<T> = Arc<dyn Fn(Option<&T>) + Send + Sync>;

struct CellInner<T> {
    /// Current value. `None` is the explicit absent sentinel, distinct
    /// from any valid value (including an empty byte sequence).
    value: RwLock<Option<T>>,
    /// Registered subscribers keyed by handle id.
    subscribers: Mutex<HashMap<u64, Callback<T>>>,
    next_id: AtomicU64,
}

/// A shared reactive container for one optional value.
///
/// Replacement is atomic and notifies all current subscribers
/// synchronously with the new value before returning. No validation is
/// performed on the content at this layer.
pub struct StateCell<T> {
    inner: Arc<CellInner<T>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateCell<T> {
    /// Create a cell in the absent state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CellInner {
                value: RwLock::new(None),
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register a callback invoked on every replacement.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes.
    pub fn subscribe(
        &self,
        callback: impl Fn(Option<&T>) + Send + Sync + 'static,
    ) -> Subscription
    where
        T: Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.subscribers).insert(id, Arc::new(callback));

        let weak: Weak<CellInner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner.subscribers).remove(&id);
                }
            })),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len()
    }

    fn replace(&self, value: Option<T>)
    where
        T: Clone,
    {
        {
            let mut slot = self
                .inner
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *slot = value.clone();
        }
        // Snapshot the subscriber list, then invoke with no lock held: a
        // callback may read the cell, subscribe, or set it again.
        let snapshot: Vec<Callback<T>> = lock(&self.inner.subscribers).values().cloned().collect();
        debug!(subscribers = snapshot.len(), "cell value replaced");
        for callback in snapshot {
            callback(value.as_ref());
        }
    }
}

impl<T: Clone> StateCell<T> {
    /// Read the current value, `None` while absent.
    pub fn get(&self) -> Option<T> {
        self.inner
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the value and notify subscribers before returning.
    pub fn set(&self, value: T) {
        self.replace(Some(value));
    }

    /// Return the cell to the absent state and notify subscribers.
    pub fn clear(&self) {
        self.replace(None);
    }
}

fn lock<K>(mutex: &Mutex<K>) -> std::sync::MutexGuard<'_, K> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Guard for a registered subscriber; dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_absent() {
        let cell: StateCell<Vec<u8>> = StateCell::new();
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn set_then_get() {
        let cell = StateCell::new();
        cell.set(vec![1u8, 2, 3]);
        assert_eq!(cell.get(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn clear_returns_to_absent() {
        let cell = StateCell::new();
        cell.set(7u32);
        cell.clear();
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn set_notifies_synchronously_with_new_value() {
        let cell = StateCell::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_cb = Arc::clone(&seen);
        let _sub = cell.subscribe(move |value| {
            lock(&seen_cb).push(value.cloned());
        });

        cell.set(41u32);
        // The notification already happened by the time set returned.
        assert_eq!(*lock(&seen), vec![Some(41)]);

        cell.set(42);
        cell.clear();
        assert_eq!(*lock(&seen), vec![Some(41), Some(42), None]);
    }

    #[test]
    fn every_subscriber_notified_exactly_once_per_set() {
        let cell = StateCell::new();
        let first = Arc::new(AtomicU64::new(0));
        let second = Arc::new(AtomicU64::new(0));

        let first_cb = Arc::clone(&first);
        let _a = cell.subscribe(move |_| {
            first_cb.fetch_add(1, Ordering::SeqCst);
        });
        let second_cb = Arc::clone(&second);
        let _b = cell.subscribe(move |_| {
            second_cb.fetch_add(1, Ordering::SeqCst);
        });

        cell.set(1u8);
        cell.set(2);

        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let cell = StateCell::new();
        let count = Arc::new(AtomicU64::new(0));

        let count_cb = Arc::clone(&count);
        let sub = cell.subscribe(move |_| {
            count_cb.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(cell.subscriber_count(), 1);

        cell.set(1u8);
        drop(sub);
        assert_eq!(cell.subscriber_count(), 0);
        cell.set(2);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn nested_set_notifies_depth_first() {
        let cell = StateCell::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let order_cb = Arc::clone(&order);
        let cell_cb = cell.clone();
        let _sub = cell.subscribe(move |value| {
            let value = value.cloned();
            lock(&order_cb).push(value);
            // Re-entrant set: bump once, from inside the notification.
            if value == Some(1u8) {
                cell_cb.set(2);
            }
        });

        cell.set(1);

        // The nested pass for 2 completed before the outer pass resumed,
        // and the cell holds the innermost value.
        assert_eq!(*lock(&order), vec![Some(1), Some(2)]);
        assert_eq!(cell.get(), Some(2));
    }

    #[test]
    fn subscriber_added_during_pass_misses_that_value() {
        let cell: StateCell<u8> = StateCell::new();
        let late_count = Arc::new(AtomicU64::new(0));
        let held = Arc::new(Mutex::new(Vec::new()));

        let cell_cb = cell.clone();
        let late_count_cb = Arc::clone(&late_count);
        let held_cb = Arc::clone(&held);
        let _sub = cell.subscribe(move |_| {
            let late_count_inner = Arc::clone(&late_count_cb);
            let sub = cell_cb.subscribe(move |_| {
                late_count_inner.fetch_add(1, Ordering::SeqCst);
            });
            // Keep the late subscription alive past this callback.
            lock(&held_cb).push(sub);
        });

        cell.set(1);
        assert_eq!(late_count.load(Ordering::SeqCst), 0);

        cell.set(2);
        // The subscriber registered during the first pass sees the second.
        assert_eq!(late_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn shared_clones_observe_the_same_cell() {
        let cell = StateCell::new();
        let clone = cell.clone();

        cell.set(vec![9u8]);
        assert_eq!(clone.get(), Some(vec![9]));
    }

    #[test]
    fn concurrent_writers_leave_one_winner() {
        let cell = StateCell::new();
        let mut handles = Vec::new();
        for i in 0..8u64 {
            let cell = cell.clone();
            handles.push(std::thread::spawn(move || cell.set(i)));
        }
        for handle in handles {
            handle.join().expect("writer thread panicked");
        }

        let value = cell.get().expect("cell should hold a value");
        assert!(value < 8);
    }
}
