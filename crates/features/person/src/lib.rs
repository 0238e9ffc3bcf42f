//! # Person
//!
//! The person feature slice: a [`PersonRecord`] with one validation rule and an
//! observable lifecycle.
//!
//! ## Architecture
//!
//! 1.  **Record ([`record`]):** owns the fields, enforces the year-of-birth bound and
//!     emits a [`PersonEvent`] for every construction, mutation and drop.
//! 2.  **Observers ([`observer`]):** the [`PersonObserver`] seam plus stock observers
//!     for logging, capture, filtering and (with the `event-bus` feature) fan-out.
//!
//! Business logic never writes to the console; rendering is the observer's job.

mod error;
pub mod observer;
pub mod record;

pub use crate::error::{PersonError, PersonErrorExt};
pub use crate::observer::{
    EventJournal, Filtered, LIFECYCLE_TARGET, NullObserver, PersonObserver, TracingObserver,
};
pub use crate::record::{PersonRecord, validate_year_of_birth};
pub use persona_domain::constants::{MIN_YEAR_OF_BIRTH, UNKNOWN_YEAR_OF_BIRTH};
pub use persona_domain::events::{EventMask, PersonEvent};
pub use persona_domain::person::{PersonName, PersonSnapshot};
