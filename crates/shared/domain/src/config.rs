use crate::events::EventMask;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for the shell and its infrastructure.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub logger: LoggerSettings,
    pub transcript: TranscriptSettings,
}

/// Logger settings, mirrored onto the logger builder at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub name: String,
    /// One of `trace`, `debug`, `info`, `warn`, `error`, `off`.
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files; file logging is off when absent.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
    /// One of `minutely`, `hourly`, `daily`, `never`.
    pub rotation: String,
    pub env_filter: Option<String>,
}

/// How the shell renders person events on stdout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    pub format: TranscriptFormat,
    pub events: EventMask,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptFormat {
    /// One human-readable line per event.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

// --- Default ---

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            name: "persona".to_owned(),
            level: "info".to_owned(),
            console: true,
            path: None,
            json: false,
            max_files: 10,
            rotation: "daily".to_owned(),
            env_filter: None,
        }
    }
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self { format: TranscriptFormat::Text, events: EventMask::ALL }
    }
}
