use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::archetype::Thresholds;
use crate::capture::DEFAULT_SENTENCE;
use crate::error::Result;
use crate::reveal::DEFAULT_MESSAGE;
use crate::session::SessionConfig;

pub const DEFAULT_HIGHLIGHT_MS: u64 = 200;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// hidden message uncovered in the reveal phase
    pub message: String,
    pub scripted_sentence: String,
    /// how long the pressed key stays lit on the keyboard
    pub highlight_ms: u64,
    pub log_level: String,
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            scripted_sentence: DEFAULT_SENTENCE.to_string(),
            highlight_ms: DEFAULT_HIGHLIGHT_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            message: cfg.message.clone(),
            sentence: cfg.scripted_sentence.clone(),
            thresholds: cfg.thresholds,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typetarot") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typetarot_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigStore {
    /// Like `load` but reports why the file could not be used. A missing
    /// file is not an error.
    pub fn read(&self) -> Result<Config> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        self.read().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "config unusable, using defaults");
            Config::default()
        })
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
