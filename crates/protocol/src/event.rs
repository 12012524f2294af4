//! Listener registries for model and view events.
//!
//! An [`EventChannel`] holds the listeners interested in one source of events.
//! Listeners are boxed closures; each returns a [`Delivery`] telling the
//! channel whether to keep it registered. Returning [`Delivery::Detach`] is
//! how a listener unregisters itself from inside its own callback.
//!
//! An [`EventBus`] is a cloneable handle over one channel per key (for
//! example one channel per task id), shared between the code that publishes
//! model changes and the controllers that listen to them.
//!
//! # Examples
//!
//! ```
//! use sprintboard_protocol::{Delivery, EventChannel};
//!
//! let mut channel: EventChannel<u32> = EventChannel::new();
//! let id = channel.subscribe(|value: &u32| {
//!     if *value > 10 { Delivery::Detach } else { Delivery::Keep }
//! });
//!
//! assert_eq!(channel.publish(&3), 1);
//! assert_eq!(channel.publish(&30), 1); // listener detaches itself
//! assert_eq!(channel.publish(&3), 0);
//! assert!(!channel.unsubscribe(id)); // already gone, no-op
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What a listener wants after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Stay registered.
    Keep,
    /// Unregister; no further events are delivered to this listener.
    Detach,
}

/// Handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E) -> Delivery + Send>;

/// The listeners of a single event source.
pub struct EventChannel<E> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<E>)>,
}

impl<E> EventChannel<E> {
    /// Creates a channel with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener and returns its handle.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&E) -> Delivery + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    fn insert(&mut self, id: ListenerId, listener: Listener<E>) {
        self.listeners.push((id, listener));
    }

    /// Unregisters a listener.
    ///
    /// Returns `false` (and does nothing) if the listener is not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() < before
    }

    /// Returns `true` if the listener is still registered.
    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(listener_id, _)| *listener_id == id)
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers an event to every listener in registration order.
    ///
    /// Listeners returning [`Delivery::Detach`] are dropped afterwards.
    /// Returns the number of listeners that received the event.
    pub fn publish(&mut self, event: &E) -> usize {
        let delivered = self.listeners.len();
        self.listeners
            .retain_mut(|(_, listener)| listener(event) == Delivery::Keep);
        delivered
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A shared registry of event channels keyed by source.
///
/// Cloning the bus clones the handle, not the channels. Listener ids are
/// unique across the whole bus and never reused, even after a channel was
/// emptied and dropped.
pub struct EventBus<K, E> {
    inner: Arc<Mutex<BusInner<K, E>>>,
}

struct BusInner<K, E> {
    next_id: u64,
    channels: HashMap<K, EventChannel<E>>,
}

impl<K, E> EventBus<K, E>
where
    K: Eq + Hash,
{
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusInner {
                next_id: 0,
                channels: HashMap::new(),
            })),
        }
    }

    /// Registers a listener on the channel of `key`.
    pub fn subscribe<F>(&self, key: K, listener: F) -> ListenerId
    where
        F: FnMut(&E) -> Delivery + Send + 'static,
    {
        let mut inner = self.lock();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner
            .channels
            .entry(key)
            .or_default()
            .insert(id, Box::new(listener));
        id
    }

    /// Unregisters a listener from the channel of `key`.
    ///
    /// Returns `false` if the listener is not registered there.
    pub fn unsubscribe(&self, key: &K, id: ListenerId) -> bool {
        self.with_channels(|channels| {
            let removed = channels
                .get_mut(key)
                .is_some_and(|channel| channel.unsubscribe(id));
            if channels.get(key).is_some_and(EventChannel::is_empty) {
                channels.remove(key);
            }
            removed
        })
    }

    /// Returns `true` if the listener is registered on the channel of `key`.
    #[must_use]
    pub fn contains(&self, key: &K, id: ListenerId) -> bool {
        self.with_channels(|channels| channels.get(key).is_some_and(|c| c.contains(id)))
    }

    /// Returns the number of listeners registered on the channel of `key`.
    #[must_use]
    pub fn listener_count(&self, key: &K) -> usize {
        self.with_channels(|channels| channels.get(key).map_or(0, EventChannel::len))
    }

    /// Publishes an event on the channel of `key`.
    ///
    /// Listeners must not call back into the same bus; they run while the bus
    /// is locked. Returns the number of listeners that received the event.
    pub fn publish(&self, key: &K, event: &E) -> usize {
        self.with_channels(|channels| {
            let delivered = channels
                .get_mut(key)
                .map_or(0, |channel| channel.publish(event));
            if channels.get(key).is_some_and(EventChannel::is_empty) {
                channels.remove(key);
            }
            delivered
        })
    }

    fn lock(&self) -> MutexGuard<'_, BusInner<K, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_channels<T>(&self, f: impl FnOnce(&mut HashMap<K, EventChannel<E>>) -> T) -> T {
        f(&mut self.lock().channels)
    }
}

impl<K, E> Clone for EventBus<K, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Eq + Hash, E> Default for EventBus<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> fmt::Debug for EventBus<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

/// A change notification about a model object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent<M> {
    /// The model was edited; carries its new value.
    Edit(M),
    /// The model was deleted.
    Delete,
    /// A relation of the model (children, parent) changed.
    RelationUpdate,
}
