//! The notification seam between a [`crate::PersonRecord`] and whoever renders its events.
//!
//! Records never print. They hand every [`PersonEvent`] to a shared [`PersonObserver`];
//! the observers here cover logging, silence, in-memory capture and filtering.

use parking_lot::Mutex;
use persona_domain::events::{EventMask, PersonEvent};
use std::sync::Arc;
use tracing::info;

/// Target used by [`TracingObserver`], so log filters can single out lifecycle lines.
pub const LIFECYCLE_TARGET: &str = "persona::lifecycle";

/// Receives every event a record emits, synchronously and in order.
pub trait PersonObserver: Send + Sync {
    fn notify(&self, event: &PersonEvent);
}

impl<O: PersonObserver + ?Sized> PersonObserver for Arc<O> {
    fn notify(&self, event: &PersonEvent) {
        (**self).notify(event);
    }
}

/// Writes each event as an `INFO` line under [`LIFECYCLE_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PersonObserver for TracingObserver {
    fn notify(&self, event: &PersonEvent) {
        info!(target: LIFECYCLE_TARGET, kind = event.name(), "{event}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PersonObserver for NullObserver {
    fn notify(&self, _event: &PersonEvent) {}
}

/// Keeps every event in arrival order.
///
/// # Examples
/// ```rust
/// use persona_person::{EventJournal, PersonRecord};
/// use std::sync::Arc;
///
/// let journal = Arc::new(EventJournal::new());
/// let mut record = PersonRecord::new(journal.clone());
/// record.set_name("Mickey", "Mouse");
/// drop(record);
///
/// let lines: Vec<String> = journal.take().iter().map(ToString::to_string).collect();
/// assert_eq!(lines.last().map(String::as_str), Some("Person Mickey Mouse born in 0 goes out of scope"));
/// ```
#[derive(Debug, Default)]
pub struct EventJournal {
    events: Mutex<Vec<PersonEvent>>,
}

impl EventJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<PersonEvent> {
        self.events.lock().clone()
    }

    /// Moves the recorded events out, leaving the journal empty.
    #[must_use]
    pub fn take(&self) -> Vec<PersonEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl PersonObserver for EventJournal {
    fn notify(&self, event: &PersonEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Forwards only the event kinds contained in `mask`.
#[derive(Debug, Clone)]
pub struct Filtered<O> {
    mask: EventMask,
    inner: O,
}

impl<O: PersonObserver> Filtered<O> {
    pub const fn new(mask: EventMask, inner: O) -> Self {
        Self { mask, inner }
    }

    pub const fn mask(&self) -> EventMask {
        self.mask
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: PersonObserver> PersonObserver for Filtered<O> {
    fn notify(&self, event: &PersonEvent) {
        if event.is_in(self.mask) {
            self.inner.notify(event);
        }
    }
}

#[cfg(feature = "event-bus")]
mod bus {
    use super::PersonObserver;
    use persona_domain::events::PersonEvent;
    use persona_event_bus::EventBus;
    use tracing::warn;

    /// Publishes each event to the bus; subscribers of `PersonEvent` receive it in place.
    impl PersonObserver for EventBus {
        fn notify(&self, event: &PersonEvent) {
            if let Err(e) = self.publish(event) {
                warn!(error = %e, kind = event.name(), "Person event was not delivered");
            }
        }
    }
}
