// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::CrackwatchError;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::CrackwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let cfg = raw.config;

        if cfg.event_buffer == 0 {
            return Err(CrackwatchError::ConfigError(
                "[config].event_buffer must be >= 1 (got 0)".to_string(),
            ));
        }

        let executable = match cfg.executable {
            Some(exe) if exe.trim().is_empty() => {
                return Err(CrackwatchError::ConfigError(
                    "[config].executable must not be empty".to_string(),
                ));
            }
            Some(exe) => exe,
            None => cfg.engine.default_executable().to_string(),
        };

        let stop_timeout = parse_duration(&cfg.stop_timeout).map_err(|e| {
            CrackwatchError::ConfigError(format!("[config].stop_timeout: {e}"))
        })?;
        let deliver_timeout = parse_duration(&cfg.deliver_timeout).map_err(|e| {
            CrackwatchError::ConfigError(format!("[config].deliver_timeout: {e}"))
        })?;
        if deliver_timeout.is_zero() {
            return Err(CrackwatchError::ConfigError(
                "[config].deliver_timeout must be greater than zero".to_string(),
            ));
        }

        Ok(ConfigFile {
            engine: cfg.engine,
            executable,
            stop_timeout,
            event_buffer: cfg.event_buffer,
            deliver_timeout,
            job: raw.job,
        })
    }
}

/// Parse a simple duration string like `"5s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value * 60)),
        "h" => Ok(Duration::from_secs(value * 60 * 60)),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}
