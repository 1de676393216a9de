// tests/config_loading.rs

use std::fs;
use std::time::Duration;

use crackwatch::config::{
    load_and_validate, load_from_path, load_or_default, parse_duration, ConfigFile,
    RawConfigFile,
};
use crackwatch::errors::CrackwatchError;
use crackwatch::types::{AttackMode, EngineVariant, HashType};
use tempfile::tempdir;

#[test]
fn full_config_file_is_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Crackwatch.toml");
    fs::write(
        &path,
        r#"
[config]
engine = "john"
executable = "/opt/john/run/john"
stop_timeout = "750ms"
event_buffer = 8
deliver_timeout = "1s"

[job]
hash_file = "hashes.txt"
wordlist = "words.txt"
rules = "best64.rule"
hash_type = "ntlm"
attack_mode = "brute-force"
extra_args = ["--fork=4"]
"#,
    )
    .unwrap();

    let cfg = load_and_validate(&path).unwrap();

    assert_eq!(cfg.engine, EngineVariant::John);
    assert_eq!(cfg.executable, "/opt/john/run/john");
    assert_eq!(cfg.stop_timeout, Duration::from_millis(750));
    assert_eq!(cfg.event_buffer, 8);
    assert_eq!(cfg.deliver_timeout, Duration::from_secs(1));
    assert_eq!(cfg.job.hash_type, HashType::Ntlm);
    assert_eq!(cfg.job.attack_mode, AttackMode::BruteForce);
    assert_eq!(cfg.job.extra_args, vec!["--fork=4".to_string()]);
    assert_eq!(
        cfg.job.rules.as_deref(),
        Some(std::path::Path::new("best64.rule"))
    );
}

#[test]
fn empty_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let cfg = load_and_validate(&path).unwrap();

    assert_eq!(cfg.engine, EngineVariant::Hashcat);
    assert_eq!(cfg.executable, "hashcat");
    assert_eq!(cfg.stop_timeout, Duration::from_secs(5));
    assert_eq!(cfg.event_buffer, 64);
    assert_eq!(cfg.deliver_timeout, Duration::from_secs(2));
    assert_eq!(cfg.job.hash_type, HashType::Md5);
    assert_eq!(cfg.job.attack_mode, AttackMode::Straight);
    assert!(cfg.job.hash_file.is_none());
}

#[test]
fn default_executable_follows_engine() {
    let mut raw = RawConfigFile::default();
    raw.config.engine = EngineVariant::John;
    let cfg = ConfigFile::try_from(raw).unwrap();
    assert_eq!(cfg.executable, "john");
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[config]\nengin = \"john\"\n").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, CrackwatchError::TomlError(_)));
}

#[test]
fn unknown_engine_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[config]\nengine = \"ophcrack\"\n").unwrap();

    assert!(load_from_path(&path).is_err());
}

#[test]
fn invalid_values_fail_validation() {
    let mut raw = RawConfigFile::default();
    raw.config.event_buffer = 0;
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(CrackwatchError::ConfigError(_))
    ));

    let mut raw = RawConfigFile::default();
    raw.config.stop_timeout = "soon".to_string();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(CrackwatchError::ConfigError(_))
    ));

    let mut raw = RawConfigFile::default();
    raw.config.deliver_timeout = "0ms".to_string();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(CrackwatchError::ConfigError(_))
    ));

    let mut raw = RawConfigFile::default();
    raw.config.executable = Some("   ".to_string());
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(CrackwatchError::ConfigError(_))
    ));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_or_default(Some(&missing)).unwrap_err();
    assert!(matches!(err, CrackwatchError::IoError(_)));
}

#[test]
fn durations() {
    assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
    assert_eq!(parse_duration(" 5s "), Ok(Duration::from_secs(5)));
    assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
    assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
    assert!(parse_duration("").is_err());
    assert!(parse_duration("10").is_err());
    assert!(parse_duration("5d").is_err());
    assert!(parse_duration("ms").is_err());
}
