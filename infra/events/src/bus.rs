use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use std::any::{Any, TypeId};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

const MIN_CAPACITY: usize = 1;

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

/// Handle returned by every subscription; pass it to [`EventBus::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;
type Erased = dyn Any + Send + Sync;

struct Subscribers<T> {
    entries: Vec<(SubscriptionId, Handler<T>)>,
}

impl<T: Event> Subscribers<T> {
    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    fn handlers(&self) -> Vec<Handler<T>> {
        self.entries.iter().map(|(_, handler)| Arc::clone(handler)).collect()
    }
}

fn remove_erased<T: Event>(subscribers: &mut Erased, id: SubscriptionId) -> bool {
    subscribers.downcast_mut::<Subscribers<T>>().is_some_and(|s| s.remove(id))
}

fn len_erased<T: Event>(subscribers: &Erased) -> usize {
    subscribers.downcast_ref::<Subscribers<T>>().map_or(0, |s| s.entries.len())
}

/// One channel per event type. The typed subscriber list is erased; the two
/// function pointers are monomorphized for the channel's type at creation.
struct ChannelState {
    event: &'static str,
    subscribers: Box<Erased>,
    remove: fn(&mut Erased, SubscriptionId) -> bool,
    len: fn(&Erased) -> usize,
}

impl std::fmt::Debug for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelState")
            .field("event", &self.event)
            .field("subscribers", &(self.len)(self.subscribers.as_ref()))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct Registry {
    channels: FxHashMap<TypeId, ChannelState>,
    owners: FxHashMap<SubscriptionId, TypeId>,
}

#[derive(Debug, Default)]
struct BusInner {
    registry: RwLock<Registry>,
    next_id: AtomicU64,
}

/// A synchronous, thread-safe event bus.
///
/// Channels are indexed by the [`TypeId`] of the event. Delivery happens on the
/// publishing thread, in subscription order, before [`EventBus::publish`] returns.
/// Handlers run outside the registry lock, so they may publish or subscribe.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for events of type `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the channel registry is inconsistent.
    ///
    /// # Examples
    /// ```rust
    /// use persona_event_bus::EventBus;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU64, Ordering};
    ///
    /// struct Tick(u64);
    ///
    /// # fn main() -> Result<(), persona_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let total = Arc::new(AtomicU64::new(0));
    /// let sink = Arc::clone(&total);
    /// bus.subscribe(move |tick: &Tick| {
    ///     sink.fetch_add(tick.0, Ordering::Relaxed);
    /// })?;
    ///
    /// assert_eq!(bus.publish(&Tick(3))?, 1);
    /// assert_eq!(total.load(Ordering::Relaxed), 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<T, F>(&self, handler: F) -> Result<SubscriptionId, EventBusError>
    where
        T: Event,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let type_id = TypeId::of::<T>();

        let mut registry = self.inner.registry.write();
        let state = registry.channels.entry(type_id).or_insert_with(|| {
            trace!(event = std::any::type_name::<T>(), "Initializing new event channel");
            ChannelState {
                event: std::any::type_name::<T>(),
                subscribers: Box::new(Subscribers::<T> { entries: Vec::new() }),
                remove: remove_erased::<T>,
                len: len_erased::<T>,
            }
        });

        let subscribers =
            state.subscribers.downcast_mut::<Subscribers<T>>().ok_or_else(|| {
                EventBusError::TypeMismatch {
                    message: std::any::type_name::<T>().into(),
                    context: Some("Unexpected event type".into()),
                }
            })?;
        subscribers.entries.push((id, Arc::new(handler)));
        registry.owners.insert(id, type_id);
        drop(registry);

        trace!(event = std::any::type_name::<T>(), ?id, "Subscriber registered");
        Ok(id)
    }

    /// Subscribes a bounded queue that keeps clones of the most recent `capacity` events.
    ///
    /// When the queue is full the oldest event is discarded and counted in
    /// [`Recorder::overflowed`].
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    /// ```rust
    /// use persona_event_bus::EventBus;
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Job(u64);
    ///
    /// # fn main() -> Result<(), persona_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let jobs = bus.record::<Job>(8)?;
    /// bus.publish(&Job(1))?;
    /// assert_eq!(jobs.drain(), vec![Job(1)]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn record<T: Event + Clone>(&self, capacity: usize) -> Result<Recorder<T>, EventBusError> {
        let capacity = validate_capacity(capacity)?;
        let queue = Arc::new(Mutex::new(RecorderQueue {
            events: VecDeque::with_capacity(capacity),
            overflowed: 0,
        }));

        let sink = Arc::clone(&queue);
        let id = self.subscribe(move |event: &T| {
            let mut queue = sink.lock();
            if queue.events.len() == capacity {
                queue.events.pop_front();
                queue.overflowed += 1;
            }
            queue.events.push_back(event.clone());
        })?;

        Ok(Recorder { id, queue })
    }

    /// Subscribes a slot that only remembers the most recent event.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the channel registry is inconsistent.
    pub fn latest<T: Event + Clone>(&self) -> Result<Latest<T>, EventBusError> {
        let slot = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&slot);
        let id = self.subscribe(move |event: &T| {
            *sink.lock() = Some(event.clone());
        })?;

        Ok(Latest { id, slot })
    }

    /// Removes a subscription.
    ///
    /// # Errors
    /// Returns [`EventBusError::SubscriptionNotFound`] for an unknown or already removed id.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<(), EventBusError> {
        let mut registry = self.inner.registry.write();
        let removed = registry.owners.remove(&id).and_then(|type_id| {
            let state = registry.channels.get_mut(&type_id)?;
            let event = state.event;
            (state.remove)(state.subscribers.as_mut(), id).then_some(event)
        });
        drop(registry);

        removed.map_or_else(
            || {
                Err(EventBusError::SubscriptionNotFound {
                    message: format!("{id:?}").into(),
                    context: None,
                })
            },
            |event| {
                trace!(event, ?id, "Subscriber removed");
                Ok(())
            },
        )
    }

    /// Delivers `event` to every subscriber of `T` and returns how many received it.
    ///
    /// Publishing with no subscribers is not an error; it returns `0`.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the channel registry is inconsistent.
    pub fn publish<T: Event>(&self, event: &T) -> Result<usize, EventBusError> {
        let handlers = {
            let registry = self.inner.registry.read();
            match registry.channels.get(&TypeId::of::<T>()) {
                None => Vec::new(),
                Some(state) => state
                    .subscribers
                    .downcast_ref::<Subscribers<T>>()
                    .ok_or_else(|| EventBusError::TypeMismatch {
                        message: std::any::type_name::<T>().into(),
                        context: Some("Unexpected event type".into()),
                    })?
                    .handlers(),
            }
        };

        if handlers.is_empty() {
            trace!(event = std::any::type_name::<T>(), "Event dropped: no active subscribers");
            return Ok(0);
        }

        for handler in &handlers {
            handler(event);
        }

        trace!(event = std::any::type_name::<T>(), count = handlers.len(), "Event dispatched");
        Ok(handlers.len())
    }

    /// Number of live subscriptions for `T`.
    #[must_use]
    pub fn subscriber_count<T: Event>(&self) -> usize {
        let registry = self.inner.registry.read();
        registry
            .channels
            .get(&TypeId::of::<T>())
            .map_or(0, |state| (state.len)(state.subscribers.as_ref()))
    }

    /// Drops every channel and subscription.
    ///
    /// Returns the number of event channels that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut registry = self.inner.registry.write();
        let count = registry.channels.len();
        registry.channels.clear();
        registry.owners.clear();
        count
    }
}

#[derive(Debug)]
struct RecorderQueue<T> {
    events: VecDeque<T>,
    overflowed: u64,
}

/// A bounded queue of recorded events, filled synchronously by the bus.
#[derive(Debug)]
pub struct Recorder<T> {
    id: SubscriptionId,
    queue: Arc<Mutex<RecorderQueue<T>>>,
}

impl<T> Recorder<T> {
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Takes every recorded event, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<T> {
        self.queue.lock().events.drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.lock().events.is_empty()
    }

    /// How many events were discarded because the queue was full.
    #[must_use]
    pub fn overflowed(&self) -> u64 {
        self.queue.lock().overflowed
    }
}

/// Latest-value slot filled synchronously by the bus.
#[derive(Debug)]
pub struct Latest<T> {
    id: SubscriptionId,
    slot: Arc<Mutex<Option<T>>>,
}

impl<T: Clone> Latest<T> {
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.slot.lock().clone()
    }

    /// Takes the value, leaving the slot empty until the next publish.
    #[must_use]
    pub fn take(&self) -> Option<T> {
        self.slot.lock().take()
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, EventBusError> {
    if capacity < MIN_CAPACITY {
        return Err(EventBusError::InvalidCapacity {
            message: format!("capacity must be >= {MIN_CAPACITY}").into(),
            context: None,
        });
    }
    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Ping(u32);

    #[test]
    fn erased_helpers_only_match_their_own_type() {
        let mut subscribers: Box<Erased> = Box::new(Subscribers::<Ping> { entries: Vec::new() });
        assert_eq!(len_erased::<Ping>(subscribers.as_ref()), 0);
        assert_eq!(len_erased::<String>(subscribers.as_ref()), 0);
        assert!(!remove_erased::<String>(subscribers.as_mut(), SubscriptionId(0)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(validate_capacity(0), Err(EventBusError::InvalidCapacity { .. })));
        assert_eq!(validate_capacity(3).ok(), Some(3));
    }
}
