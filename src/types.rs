// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which password-recovery engine a run drives.
///
/// Selects both the command-line shape (see [`crate::launch`]) and the output
/// grammar used by the classifier (see [`crate::grammar`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineVariant {
    /// hashcat: real `Progress` percentages, `hash:plain` result lines.
    Hashcat,
    /// John the Ripper: no completion percentage, `user:hash:plain` results.
    John,
}

impl Default for EngineVariant {
    fn default() -> Self {
        EngineVariant::Hashcat
    }
}

impl EngineVariant {
    /// Executable name looked up on `PATH` when no override is configured.
    pub fn default_executable(self) -> &'static str {
        match self {
            EngineVariant::Hashcat => "hashcat",
            EngineVariant::John => "john",
        }
    }

    /// Human-facing name used in status messages.
    pub fn display_name(self) -> &'static str {
        match self {
            EngineVariant::Hashcat => "Hashcat",
            EngineVariant::John => "John",
        }
    }
}

impl fmt::Display for EngineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_executable())
    }
}

impl FromStr for EngineVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hashcat" => Ok(EngineVariant::Hashcat),
            "john" | "john-the-ripper" => Ok(EngineVariant::John),
            other => Err(format!(
                "invalid engine: {other} (expected \"hashcat\" or \"john\")"
            )),
        }
    }
}

/// Hash algorithms offered by the launch builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashType {
    Md5,
    Sha1,
    Ntlm,
    Sha256,
}

impl Default for HashType {
    fn default() -> Self {
        HashType::Md5
    }
}

impl HashType {
    pub const ALL: [HashType; 4] = [
        HashType::Md5,
        HashType::Sha1,
        HashType::Ntlm,
        HashType::Sha256,
    ];

    /// hashcat `--hash-type` mode number.
    pub fn hashcat_mode(self) -> u32 {
        match self {
            HashType::Md5 => 0,
            HashType::Sha1 => 100,
            HashType::Ntlm => 1000,
            HashType::Sha256 => 1400,
        }
    }

    /// John the Ripper `--format=` name.
    pub fn john_format(self) -> &'static str {
        match self {
            HashType::Md5 => "raw-md5",
            HashType::Sha1 => "raw-sha1",
            HashType::Ntlm => "nt",
            HashType::Sha256 => "raw-sha256",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HashType::Md5 => "MD5",
            HashType::Sha1 => "SHA1",
            HashType::Ntlm => "NTLM",
            HashType::Sha256 => "SHA-256",
        }
    }

    /// A well-formed sample hash of this type.
    pub fn example_hash(self) -> &'static str {
        match self {
            HashType::Md5 => "8743b52063cd84097a65d1633f5c74f5",
            HashType::Sha1 => "b89eaac7e61417341b710b727768294d0e6a277b",
            HashType::Ntlm => "B4B9B02E6F09A9BD760F388B67351E2B",
            HashType::Sha256 => {
                "127e6fbfe24a750e72930c220a8e138275656b8e5d8f48a98c3c92df2caba935"
            }
        }
    }
}

/// hashcat attack modes. John ignores these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AttackMode {
    Straight,
    Combination,
    BruteForce,
    HybridWordlistMask,
    HybridMaskWordlist,
}

impl Default for AttackMode {
    fn default() -> Self {
        AttackMode::Straight
    }
}

impl AttackMode {
    /// hashcat `--attack-mode` number.
    pub fn hashcat_mode(self) -> u32 {
        match self {
            AttackMode::Straight => 0,
            AttackMode::Combination => 1,
            AttackMode::BruteForce => 3,
            AttackMode::HybridWordlistMask => 6,
            AttackMode::HybridMaskWordlist => 7,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AttackMode::Straight => "Straight",
            AttackMode::Combination => "Combination",
            AttackMode::BruteForce => "Brute-Force",
            AttackMode::HybridWordlistMask => "Hybrid Wordlist + Mask",
            AttackMode::HybridMaskWordlist => "Hybrid Mask + Wordlist",
        }
    }
}
