//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O and no observers, just the person data, the events a record emits,
//! and the configuration shapes shared by the shell and the infrastructure crates.

pub mod config;
pub mod constants;
pub mod events;
pub mod person;
