// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::{AttackMode, EngineVariant, HashType};

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// engine = "hashcat"
/// stop_timeout = "5s"
///
/// [job]
/// hash_file = "hashes.txt"
/// wordlist = "rockyou.txt"
/// hash_type = "md5"
/// attack_mode = "straight"
/// ```
///
/// Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub job: JobSection,
}

/// `[config]` section: which engine and how to supervise it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    #[serde(default)]
    pub engine: EngineVariant,

    /// Executable to run instead of the engine's default binary name.
    #[serde(default)]
    pub executable: Option<String>,

    /// Grace period after a stop request before the engine is killed.
    #[serde(default = "default_stop_timeout")]
    pub stop_timeout: String,

    /// Capacity of the event channel between parser and consumer.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// How long the parser waits for a full event channel per event.
    #[serde(default = "default_deliver_timeout")]
    pub deliver_timeout: String,
}

fn default_stop_timeout() -> String {
    "5s".to_string()
}

fn default_event_buffer() -> usize {
    64
}

fn default_deliver_timeout() -> String {
    "2s".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            engine: EngineVariant::default(),
            executable: None,
            stop_timeout: default_stop_timeout(),
            event_buffer: default_event_buffer(),
            deliver_timeout: default_deliver_timeout(),
        }
    }
}

/// `[job]` section: what the engine should attack.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSection {
    #[serde(default)]
    pub hash_file: Option<PathBuf>,

    #[serde(default)]
    pub wordlist: Option<PathBuf>,

    #[serde(default)]
    pub rules: Option<PathBuf>,

    #[serde(default)]
    pub hash_type: HashType,

    /// Only meaningful for hashcat.
    #[serde(default)]
    pub attack_mode: AttackMode,

    /// Appended verbatim to the generated engine arguments.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub engine: EngineVariant,
    /// Resolved executable (override or the engine's default name).
    pub executable: String,
    pub stop_timeout: Duration,
    pub event_buffer: usize,
    pub deliver_timeout: Duration,
    pub job: JobSection,
}
