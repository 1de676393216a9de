// tests/launch_args.rs

use std::fs;
use std::path::{Path, PathBuf};

use crackwatch::errors::CrackwatchError;
use crackwatch::launch::build_launch;
use crackwatch::types::{AttackMode, EngineVariant, HashType};
use crackwatch_test_utils::builders::ConfigFileBuilder;
use tempfile::{tempdir, TempDir};

struct Inputs {
    _dir: TempDir,
    hashes: PathBuf,
    words: PathBuf,
    rules: PathBuf,
}

fn inputs() -> Inputs {
    let dir = tempdir().unwrap();
    let hashes = dir.path().join("hashes.txt");
    let words = dir.path().join("words.txt");
    let rules = dir.path().join("best64.rule");
    fs::write(&hashes, "5f4dcc3b5aa765d61d8327deb882cf99\n").unwrap();
    fs::write(&words, "password\n").unwrap();
    fs::write(&rules, ":\n").unwrap();
    Inputs {
        _dir: dir,
        hashes,
        words,
        rules,
    }
}

fn s(p: &Path) -> String {
    p.display().to_string()
}

#[test]
fn hashcat_command_line() {
    let inp = inputs();
    let cfg = ConfigFileBuilder::new()
        .hash_file(&inp.hashes)
        .wordlist(&inp.words)
        .rules(&inp.rules)
        .hash_type(HashType::Sha1)
        .attack_mode(AttackMode::Straight)
        .extra_arg("-w")
        .extra_arg("3")
        .build();

    let launch = build_launch(&cfg).unwrap();

    assert_eq!(launch.engine, EngineVariant::Hashcat);
    assert_eq!(launch.program, "hashcat");
    assert_eq!(
        launch.args,
        vec![
            "--hash-type".to_string(),
            "100".to_string(),
            "--attack-mode".to_string(),
            "0".to_string(),
            "--potfile-disable".to_string(),
            "--force".to_string(),
            s(&inp.hashes),
            s(&inp.words),
            "--rules-file".to_string(),
            s(&inp.rules),
            "-w".to_string(),
            "3".to_string(),
        ]
    );
    assert!(launch.command_line().starts_with("hashcat --hash-type 100"));
}

#[test]
fn hashcat_brute_force_without_wordlist() {
    let inp = inputs();
    let cfg = ConfigFileBuilder::new()
        .hash_file(&inp.hashes)
        .hash_type(HashType::Ntlm)
        .attack_mode(AttackMode::BruteForce)
        .extra_arg("?a?a?a?a")
        .build();

    let launch = build_launch(&cfg).unwrap();
    assert_eq!(
        launch.args,
        vec![
            "--hash-type".to_string(),
            "1000".to_string(),
            "--attack-mode".to_string(),
            "3".to_string(),
            "--potfile-disable".to_string(),
            "--force".to_string(),
            s(&inp.hashes),
            "?a?a?a?a".to_string(),
        ]
    );
}

#[test]
fn john_command_line() {
    let inp = inputs();
    let cfg = ConfigFileBuilder::new()
        .engine(EngineVariant::John)
        .executable("/usr/sbin/john")
        .hash_file(&inp.hashes)
        .wordlist(&inp.words)
        .rules(&inp.rules)
        .hash_type(HashType::Sha256)
        .extra_arg("--fork=2")
        .build();

    let launch = build_launch(&cfg).unwrap();

    assert_eq!(launch.program, "/usr/sbin/john");
    assert_eq!(
        launch.args,
        vec![
            "--format=raw-sha256".to_string(),
            format!("--wordlist={}", s(&inp.words)),
            format!("--rules={}", s(&inp.rules)),
            "--fork=2".to_string(),
            s(&inp.hashes),
        ]
    );
}

#[test]
fn missing_hash_file_is_rejected() {
    let cfg = ConfigFileBuilder::new().build();
    let err = build_launch(&cfg).unwrap_err();
    assert!(matches!(err, CrackwatchError::MissingInput(_)));
}

#[test]
fn nonexistent_inputs_are_rejected() {
    let inp = inputs();

    let cfg = ConfigFileBuilder::new()
        .hash_file(inp.hashes.with_file_name("gone.txt"))
        .build();
    assert!(matches!(
        build_launch(&cfg),
        Err(CrackwatchError::MissingInput(_))
    ));

    let cfg = ConfigFileBuilder::new()
        .hash_file(&inp.hashes)
        .wordlist(inp.words.with_file_name("gone.txt"))
        .build();
    assert!(matches!(
        build_launch(&cfg),
        Err(CrackwatchError::MissingInput(_))
    ));
}

#[test]
fn hash_type_tables_cover_both_engines() {
    for ht in HashType::ALL {
        assert!(!ht.john_format().is_empty());
        assert!(!ht.example_hash().is_empty());
    }
    assert_eq!(HashType::Md5.hashcat_mode(), 0);
    assert_eq!(HashType::Md5.john_format(), "raw-md5");
    assert_eq!(HashType::Ntlm.john_format(), "nt");
}
