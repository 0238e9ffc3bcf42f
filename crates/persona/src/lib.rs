//! Facade crate for `Persona` features and shared modules.
//! Re-exports domain/kernel primitives, the person slice and the process scope.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `persona` (the `event-bus` feature is on by default).
//! - Build records with [`person::PersonRecord`]; wire observers with `lifecycle_observer`.

pub use persona_domain as domain;
#[cfg(feature = "event-bus")]
pub use persona_event_bus as events;
pub use persona_kernel as kernel;
pub use persona_person as person;
pub use persona_runtime as runtime;

/// Feature registry for runtime introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "person",
        #[cfg(feature = "event-bus")]
        "event-bus",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Observer that publishes the kinds in `mask` to `bus`; everything else is dropped
/// before it reaches any subscriber.
#[cfg(feature = "event-bus")]
#[must_use]
pub fn lifecycle_observer(
    bus: &persona_event_bus::EventBus,
    mask: domain::events::EventMask,
) -> std::sync::Arc<dyn person::PersonObserver> {
    std::sync::Arc::new(person::Filtered::new(mask, bus.clone()))
}
