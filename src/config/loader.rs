// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to get
/// a checked [`ConfigFile`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load the raw config for the CLI.
///
/// - An explicitly given path must exist.
/// - Without one, `Crackwatch.toml` in the working directory is used if it
///   exists; otherwise all defaults apply.
pub fn load_or_default(explicit: Option<&Path>) -> Result<RawConfigFile> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    let fallback = default_config_path();
    if fallback.exists() {
        debug!(path = %fallback.display(), "using config from working directory");
        load_from_path(&fallback)
    } else {
        debug!("no config file found; using defaults");
        Ok(RawConfigFile::default())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("Crackwatch.toml")
}
