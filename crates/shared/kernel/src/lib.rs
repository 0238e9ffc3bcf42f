//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports the domain model and owns config loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use persona_kernel::config::load_config;
//! use persona_kernel::domain::config::PersonaConfig;
//!
//! let cfg: PersonaConfig = load_config(Some("persona.toml")).unwrap_or_default();
//! assert!(!cfg.logger.name.is_empty());
//! ```
pub mod config;
pub mod prelude;

pub use persona_domain as domain;
