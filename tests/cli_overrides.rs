// tests/cli_overrides.rs

use std::path::PathBuf;

use clap::Parser;
use crackwatch::cli::CliArgs;
use crackwatch::config::{ConfigFile, RawConfigFile};
use crackwatch::types::{AttackMode, EngineVariant, HashType};

#[test]
fn flags_override_file_values() {
    let args = CliArgs::try_parse_from([
        "crackwatch",
        "--engine",
        "john",
        "--hash-file",
        "h.txt",
        "--wordlist",
        "w.txt",
        "--hash-type",
        "sha1",
        "--attack-mode",
        "hybrid-wordlist-mask",
        "--stop-timeout",
        "1s",
        "--",
        "--fork=2",
        "--session=x",
    ])
    .unwrap();

    let mut raw = RawConfigFile::default();
    raw.job.extra_args.push("--from-file".to_string());
    args.apply_overrides(&mut raw);

    let cfg = ConfigFile::try_from(raw).unwrap();
    assert_eq!(cfg.engine, EngineVariant::John);
    assert_eq!(cfg.executable, "john");
    assert_eq!(cfg.stop_timeout, std::time::Duration::from_secs(1));
    assert_eq!(cfg.job.hash_file, Some(PathBuf::from("h.txt")));
    assert_eq!(cfg.job.wordlist, Some(PathBuf::from("w.txt")));
    assert_eq!(cfg.job.hash_type, HashType::Sha1);
    assert_eq!(cfg.job.attack_mode, AttackMode::HybridWordlistMask);
    assert_eq!(
        cfg.job.extra_args,
        vec!["--from-file", "--fork=2", "--session=x"]
    );
}

#[test]
fn absent_flags_leave_config_untouched() {
    let args = CliArgs::try_parse_from(["crackwatch"]).unwrap();

    let mut raw = RawConfigFile::default();
    raw.config.engine = EngineVariant::John;
    raw.config.executable = Some("/opt/john".to_string());
    args.apply_overrides(&mut raw);

    assert_eq!(raw.config.engine, EngineVariant::John);
    assert_eq!(raw.config.executable.as_deref(), Some("/opt/john"));
    assert!(!args.dry_run);
    assert!(!args.show_output);
}

#[test]
fn unknown_engine_value_is_rejected() {
    assert!(CliArgs::try_parse_from(["crackwatch", "--engine", "ophcrack"]).is_err());
}
