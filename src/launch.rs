// src/launch.rs

//! Engine command-line construction.
//!
//! Turns a validated [`ConfigFile`] into the `(program, args)` pair handed to
//! the supervisor. Input files are checked up front so an obviously broken
//! job never gets as far as spawning an engine.

use std::path::Path;

use crate::config::{ConfigFile, JobSection};
use crate::errors::{CrackwatchError, Result};
use crate::types::EngineVariant;

/// A fully built engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub engine: EngineVariant,
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchCommand {
    /// `program arg1 arg2 ...`, for display and the run transcript.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            return self.program.clone();
        }
        format!("{} {}", self.program, self.args.join(" "))
    }
}

/// Build the engine invocation for `cfg`.
///
/// Fails with [`CrackwatchError::MissingInput`] when no hash file is
/// configured or when a configured hash file, wordlist or rules file does not
/// exist.
pub fn build_launch(cfg: &ConfigFile) -> Result<LaunchCommand> {
    let job = &cfg.job;
    check_inputs(job)?;

    let args = match cfg.engine {
        EngineVariant::Hashcat => hashcat_args(job),
        EngineVariant::John => john_args(job),
    };

    Ok(LaunchCommand {
        engine: cfg.engine,
        program: cfg.executable.clone(),
        args,
    })
}

fn check_inputs(job: &JobSection) -> Result<()> {
    let hash_file = job.hash_file.as_deref().ok_or_else(|| {
        CrackwatchError::MissingInput("no hash file specified".to_string())
    })?;
    require_file("hash file", hash_file)?;

    if let Some(wordlist) = job.wordlist.as_deref() {
        require_file("wordlist", wordlist)?;
    }
    if let Some(rules) = job.rules.as_deref() {
        require_file("rules file", rules)?;
    }
    Ok(())
}

fn require_file(what: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(CrackwatchError::MissingInput(format!("{what} path is empty")));
    }
    if !path.is_file() {
        return Err(CrackwatchError::MissingInput(format!(
            "{what} '{}' does not exist",
            path.display()
        )));
    }
    Ok(())
}

/// `--hash-type N --attack-mode M --potfile-disable --force <hashes> [<wordlist>] [--rules-file <rules>]`
///
/// The potfile is disabled so previously cracked hashes are reported again.
fn hashcat_args(job: &JobSection) -> Vec<String> {
    let mut args = vec![
        "--hash-type".to_string(),
        job.hash_type.hashcat_mode().to_string(),
        "--attack-mode".to_string(),
        job.attack_mode.hashcat_mode().to_string(),
        "--potfile-disable".to_string(),
        "--force".to_string(),
    ];

    if let Some(hash_file) = &job.hash_file {
        args.push(hash_file.display().to_string());
    }
    if let Some(wordlist) = &job.wordlist {
        args.push(wordlist.display().to_string());
    }
    if let Some(rules) = &job.rules {
        args.push("--rules-file".to_string());
        args.push(rules.display().to_string());
    }

    args.extend(job.extra_args.iter().cloned());
    args
}

/// `--format=F [--wordlist=W] [--rules=R] [extra...] <hashes>`
fn john_args(job: &JobSection) -> Vec<String> {
    let mut args = vec![format!("--format={}", job.hash_type.john_format())];

    if let Some(wordlist) = &job.wordlist {
        args.push(format!("--wordlist={}", wordlist.display()));
    }
    if let Some(rules) = &job.rules {
        args.push(format!("--rules={}", rules.display()));
    }

    args.extend(job.extra_args.iter().cloned());

    if let Some(hash_file) = &job.hash_file {
        args.push(hash_file.display().to_string());
    }
    args
}
