//! Observable state containers the view layer binds to
//!
//! [`Store`] carries one value and a subscriber list: a subscriber callback
//! runs once with the current value at subscription time and again after
//! every write. [`Derived`] mirrors another store through a mapping function.
//!
//! Callbacks run outside the value lock, so a subscriber may read any store
//! re-entrantly. A subscriber must not write to the store it observes; that
//! write would re-enter its own callback.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Box<dyn FnMut(&T) + Send>;
type SharedCallback<T> = Arc<Mutex<Callback<T>>>;

// A panicking subscriber must not wedge every later write.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Inner<T> {
    value: Mutex<T>,
    subscribers: Mutex<BTreeMap<u64, SharedCallback<T>>>,
    next_id: AtomicU64,
}

/// Mutable value with subscriber notification on every write.
///
/// Clones share the same value and subscriber list.
pub struct Store<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &*lock(&self.inner.value))
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(value),
                subscribers: Mutex::new(BTreeMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        lock(&self.inner.value).clone()
    }

    /// Replace the value and notify every subscriber.
    pub fn set(&self, value: T) {
        let snapshot = value.clone();
        *lock(&self.inner.value) = value;
        self.notify(&snapshot);
    }

    /// Mutate the value in place and notify every subscriber.
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        let snapshot = {
            let mut guard = lock(&self.inner.value);
            mutate(&mut guard);
            guard.clone()
        };
        self.notify(&snapshot);
    }

    /// Register a callback: it runs now with the current value, then after
    /// every write, until the returned handle unsubscribes.
    ///
    /// Dropping the handle unsubscribes; hold it for as long as the callback
    /// should stay live, or [`Subscription::detach`] it.
    #[must_use = "dropping the handle cancels the subscription"]
    pub fn subscribe(&self, callback: impl FnMut(&T) + Send + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let shared: SharedCallback<T> = Arc::new(Mutex::new(Box::new(callback)));

        lock(&self.inner.subscribers).insert(id, Arc::clone(&shared));

        let snapshot = self.get();
        (*lock(&shared))(&snapshot);

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner.subscribers).remove(&id);
                }
            })),
        }
    }

    fn notify(&self, value: &T) {
        // Snapshot the list first; callbacks may subscribe or unsubscribe.
        let callbacks: Vec<SharedCallback<T>> =
            lock(&self.inner.subscribers).values().cloned().collect();

        for callback in callbacks {
            (*lock(&callback))(value);
        }
    }
}

/// Handle for one registered subscriber.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Stop the callback from running again.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    /// Keep the callback registered for the lifetime of the store.
    pub fn detach(mut self) {
        self.cancel = None;
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Read-only store mirroring a source store through a mapping function.
///
/// Stays subscribed to its source for its own lifetime.
pub struct Derived<T> {
    inner: Store<T>,
    _source: Subscription,
}

impl<T: Clone + Send + 'static> Derived<T> {
    pub fn new<S, F>(source: &Store<S>, mut map: F) -> Self
    where
        S: Clone + Send + 'static,
        F: FnMut(&S) -> T + Send + 'static,
    {
        let inner = Store::new(map(&source.get()));
        let mirror = inner.clone();
        let subscription = source.subscribe(move |value| mirror.set(map(value)));

        Self {
            inner,
            _source: subscription,
        }
    }

    pub fn get(&self) -> T {
        self.inner.get()
    }

    #[must_use = "dropping the handle cancels the subscription"]
    pub fn subscribe(&self, callback: impl FnMut(&T) + Send + 'static) -> Subscription {
        self.inner.subscribe(callback)
    }
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("value", &*lock(&self.inner.inner.value))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_subscriber<T: Clone + Send + 'static>(
        store: &Store<T>,
    ) -> (Arc<Mutex<Vec<T>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |value| sink.lock().unwrap().push(value.clone()));
        (seen, subscription)
    }

    #[test]
    fn subscriber_runs_immediately_with_the_current_value() {
        let store = Store::new(7u32);
        let (seen, _keep) = recording_subscriber(&store);

        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[test]
    fn every_write_notifies_in_order() {
        let store = Store::new(0u32);
        let (seen, _keep) = recording_subscriber(&store);

        store.set(1);
        store.update(|v| *v += 10);

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 11]);
        assert_eq!(store.get(), 11);
    }

    #[test]
    fn all_subscribers_hear_the_same_write() {
        let store = Store::new(String::from("a"));
        let (first, _keep_first) = recording_subscriber(&store);
        let (second, _keep_second) = recording_subscriber(&store);

        store.set(String::from("b"));

        assert_eq!(*first.lock().unwrap(), vec!["a", "b"]);
        assert_eq!(*second.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = Store::new(0u32);
        let (seen, subscription) = recording_subscriber(&store);

        subscription.unsubscribe();
        store.set(5);

        assert_eq!(*seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn dropping_the_handle_unsubscribes() {
        let store = Store::new(0u32);
        let (seen, subscription) = recording_subscriber(&store);

        drop(subscription);
        store.set(5);

        assert_eq!(*seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn detach_keeps_the_subscriber_registered() {
        let store = Store::new(0u32);
        let (seen, subscription) = recording_subscriber(&store);

        subscription.detach();
        store.set(5);

        assert_eq!(*seen.lock().unwrap(), vec![0, 5]);
    }

    #[test]
    fn a_callback_may_read_other_stores() {
        let store = Store::new(1u32);
        let other = Store::new(100u32);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let other_handle = other.clone();
        let _keep = store.subscribe(move |value| {
            sink.lock().unwrap().push(value + other_handle.get());
        });

        store.set(2);

        assert_eq!(*seen.lock().unwrap(), vec![101, 102]);
    }

    #[test]
    fn clones_share_value_and_subscribers() {
        let store = Store::new(0u32);
        let alias = store.clone();
        let (seen, _keep) = recording_subscriber(&store);

        alias.set(9);

        assert_eq!(store.get(), 9);
        assert_eq!(*seen.lock().unwrap(), vec![0, 9]);
    }

    #[test]
    fn writes_from_another_thread_land() {
        let store = Store::new(0u32);
        let writer = store.clone();

        let handle = std::thread::spawn(move || writer.set(42));
        handle.join().unwrap();

        assert_eq!(store.get(), 42);
    }

    #[test]
    fn derived_mirrors_its_source() {
        let source = Store::new(2u32);
        let doubled = Derived::new(&source, |v| v * 2);

        assert_eq!(doubled.get(), 4);

        source.set(10);
        assert_eq!(doubled.get(), 20);
    }

    #[test]
    fn derived_notifies_its_own_subscribers() {
        let source = Store::new(1u32);
        let doubled = Derived::new(&source, |v| v * 2);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _keep = doubled.subscribe(move |value| sink.lock().unwrap().push(*value));

        source.set(3);

        assert_eq!(*seen.lock().unwrap(), vec![2, 6]);
    }
}
