use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// File stem used when no explicit path is given; the extension is detected.
pub const DEFAULT_CONFIG_FILE: &str = "persona";
/// Environment variables with this prefix override file values.
pub const ENV_PREFIX: &str = "PERSONA";
const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[persona_derive::persona_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from a file (e.g., `persona.toml`). If no path is provided, it defaults to `"persona"`.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `PERSONA__`.
///    Nested structures are accessed using double underscores (e.g., `PERSONA__LOGGER__LEVEL` maps to `logger.level`).
///
/// # Errors
/// This function will return an error if:
/// * The specified (or default) configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use persona_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     level: String,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR));

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
