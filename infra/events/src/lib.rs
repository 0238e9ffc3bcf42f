//! # Event Bus
//!
//! A type-safe, synchronous event bus for in-process observers.
//!
//! ## Overview
//!
//! Provides a centralized `EventBus` that connects decoupled components. Each event
//! type gets its own channel; every subscriber of that type is invoked on the
//! publishing thread before `publish` returns.
//!
//! ## Features
//!
//! * **Type-Safe**: Events are identified by their Rust type.
//! * **Subscriber kinds**: callbacks, bounded recorders, latest-value slots.
//! * **Re-entrant**: handlers run outside the registry lock.
//! * **Fast lookups**: `FxHashMap` + `parking_lot::RwLock`.
//!
//! # Example
//!
//! ```rust
//! use persona_event_bus::{EventBus, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct UserRenamed { id: u64 }
//!
//! fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let renamed = bus.record::<UserRenamed>(16)?;
//!     bus.publish(&UserRenamed { id: 42 })?;
//!
//!     assert_eq!(renamed.drain(), vec![UserRenamed { id: 42 }]);
//!     Ok(())
//! }
//! ```

mod bus;
mod error;

pub use bus::{Event, EventBus, Latest, Recorder, SubscriptionId};
pub use error::{EventBusError, EventBusErrorExt};
