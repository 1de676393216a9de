// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RawConfigFile;
use crate::types::{AttackMode, EngineVariant, HashType};

/// Command-line arguments for `crackwatch`.
///
/// Flags override the corresponding config file values.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "crackwatch",
    version,
    about = "Run hashcat or John the Ripper and follow progress and cracked credentials.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Crackwatch.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Engine to drive.
    #[arg(long, value_enum)]
    pub engine: Option<EngineVariant>,

    /// Engine executable (defaults to `hashcat` / `john` on PATH).
    #[arg(long, value_name = "PATH")]
    pub executable: Option<String>,

    /// File with the hashes to recover.
    #[arg(long, value_name = "PATH")]
    pub hash_file: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub wordlist: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub hash_type: Option<HashType>,

    /// hashcat attack mode (ignored for john).
    #[arg(long, value_enum)]
    pub attack_mode: Option<AttackMode>,

    /// Grace period after Ctrl-C before the engine is killed (e.g. "5s").
    #[arg(long, value_name = "DURATION")]
    pub stop_timeout: Option<String>,

    /// Echo raw engine output to stderr.
    #[arg(long)]
    pub show_output: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRACKWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the engine command line, but don't run it.
    #[arg(long)]
    pub dry_run: bool,

    /// Extra arguments passed to the engine verbatim (after `--`).
    #[arg(last = true, value_name = "ENGINE_ARGS")]
    pub extra_args: Vec<String>,
}

impl CliArgs {
    /// Overlay the flags that were given on top of the file config.
    pub fn apply_overrides(&self, raw: &mut RawConfigFile) {
        if let Some(engine) = self.engine {
            raw.config.engine = engine;
        }
        if let Some(exe) = &self.executable {
            raw.config.executable = Some(exe.clone());
        }
        if let Some(stop_timeout) = &self.stop_timeout {
            raw.config.stop_timeout = stop_timeout.clone();
        }
        if let Some(path) = &self.hash_file {
            raw.job.hash_file = Some(path.clone());
        }
        if let Some(path) = &self.wordlist {
            raw.job.wordlist = Some(path.clone());
        }
        if let Some(path) = &self.rules {
            raw.job.rules = Some(path.clone());
        }
        if let Some(hash_type) = self.hash_type {
            raw.job.hash_type = hash_type;
        }
        if let Some(attack_mode) = self.attack_mode {
            raw.job.attack_mode = attack_mode;
        }
        raw.job.extra_args.extend(self.extra_args.iter().cloned());
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
