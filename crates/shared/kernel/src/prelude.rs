pub use crate::config::{ConfigError, ConfigErrorExt, load_config};
pub use persona_domain::config::{
    LoggerSettings, PersonaConfig, TranscriptFormat, TranscriptSettings,
};
pub use persona_domain::events::{EventMask, PersonEvent};
pub use persona_domain::person::{PersonName, PersonSnapshot};
