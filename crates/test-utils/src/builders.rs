use std::path::Path;

use crackwatch::config::{ConfigFile, ConfigSection, JobSection, RawConfigFile};
use crackwatch::types::{AttackMode, EngineVariant, HashType};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                job: JobSection::default(),
            },
        }
    }

    pub fn engine(mut self, engine: EngineVariant) -> Self {
        self.config.config.engine = engine;
        self
    }

    pub fn executable(mut self, exe: &str) -> Self {
        self.config.config.executable = Some(exe.to_string());
        self
    }

    pub fn hash_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.job.hash_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn wordlist(mut self, path: impl AsRef<Path>) -> Self {
        self.config.job.wordlist = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn rules(mut self, path: impl AsRef<Path>) -> Self {
        self.config.job.rules = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn hash_type(mut self, hash_type: HashType) -> Self {
        self.config.job.hash_type = hash_type;
        self
    }

    pub fn attack_mode(mut self, mode: AttackMode) -> Self {
        self.config.job.attack_mode = mode;
        self
    }

    pub fn extra_arg(mut self, arg: &str) -> Self {
        self.config.job.extra_args.push(arg.to_string());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
