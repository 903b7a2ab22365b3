// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::process::Era;

pub const DEFAULT_HISTORICAL_FILE: &str = "ccc_compiled_20172020_utf8.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "ccc_normalized.csv";
pub const DEFAULT_BASE_URL: &str = "https://dataverse.harvard.edu/api/access/datafile";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const FILE_ID_2021_2024: &str = "10822959";
pub const FILE_ID_2025: &str = "13448233";

/// Everything a run needs, fixed once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Static 2017–2020 compiled file.
    pub historical_path: PathBuf,
    /// Destination of the merged dataset; overwritten on each run.
    pub output_path: PathBuf,
    pub dataverse: DataverseConfig,
    pub files: FileIds,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataverseConfig {
    pub base_url: String,
    /// Some servers turn away requests with an empty or default agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Dataverse file ids for the downloadable eras.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileIds {
    /// 2021–2024
    pub recent: String,
    /// 2025 onwards
    pub current: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            historical_path: PathBuf::from(DEFAULT_HISTORICAL_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            dataverse: DataverseConfig::default(),
            files: FileIds::default(),
        }
    }
}

impl Default for DataverseConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for FileIds {
    fn default() -> Self {
        Self {
            recent: FILE_ID_2021_2024.to_string(),
            current: FILE_ID_2025.to_string(),
        }
    }
}

impl FileIds {
    /// Remote id for `era`, or `None` for the local-only historical era.
    pub fn for_era(&self, era: Era) -> Option<&str> {
        match era {
            Era::Historical => None,
            Era::Recent => Some(self.recent.as_str()),
            Era::Current => Some(self.current.as_str()),
        }
    }
}

impl Config {
    /// Parse a YAML config; keys left out keep their defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("parsing YAML config")
    }

    /// Load from `path`, or the built-in defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let text = fs::read_to_string(p)
                    .with_context(|| format!("reading config {}", p.display()))?;
                Self::from_yaml_str(&text).with_context(|| format!("in {}", p.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolve relative input and output paths against `dir`.
    pub fn rooted_at(mut self, dir: &Path) -> Self {
        if self.historical_path.is_relative() {
            self.historical_path = dir.join(&self.historical_path);
        }
        if self.output_path.is_relative() {
            self.output_path = dir.join(&self.output_path);
        }
        self
    }
}
