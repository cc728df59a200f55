//! User configuration, read from `config.yaml` in the platform config dir.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::remote::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::scoring::ScoringPolicy;
use crate::session::{
    SessionConfig, PRACTICE_DURATION_SECS, PRACTICE_SAMPLE_SIZE, REMOTE_DURATION_SECS,
};

pub const TOKEN_ENV: &str = "SKILLQUIZ_TOKEN";
pub const API_URL_ENV: &str = "SKILLQUIZ_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default = "FlowConfig::remote")]
    pub remote: FlowConfig,
    #[serde(default = "FlowConfig::practice")]
    pub practice: FlowConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Timing and sampling of one quiz flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub duration_secs: u64,
    #[serde(default)]
    pub sample_size: Option<usize>,
}

impl FlowConfig {
    fn remote() -> Self {
        Self {
            duration_secs: REMOTE_DURATION_SECS,
            sample_size: None,
        }
    }

    fn practice() -> Self {
        Self {
            duration_secs: PRACTICE_DURATION_SECS,
            sample_size: Some(PRACTICE_SAMPLE_SIZE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Reads `explicit` when given (it must exist), otherwise the default
    /// location, falling back to defaults when that file is absent.
    /// Environment overrides are applied on top.
    pub fn load(explicit: Option<&Path>) -> Result<Self, QuizError> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Self::config_path().filter(|p| p.exists()),
        };
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::defaults(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Built-in settings, with each flow on its own preset.
    pub fn defaults() -> Self {
        Self {
            api: ApiConfig::default(),
            remote: FlowConfig::remote(),
            practice: FlowConfig::practice(),
            log: LogConfig::default(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, QuizError> {
        let content = std::fs::read_to_string(path).map_err(|source| QuizError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| QuizError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::defaults());
        }
        serde_yaml::from_str(content)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.api.token = Some(token);
        }
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), QuizError> {
        let content = serde_yaml::to_string(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| QuizError::ReportWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| QuizError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "skillquiz")
            .map(|d| d.config_dir().join("config.yaml"))
    }

    /// Log directory: configured, or `logs/` under the platform data dir.
    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log.dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "skillquiz")
            .map(|d| d.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    pub fn remote_session(&self) -> SessionConfig {
        SessionConfig {
            duration_secs: self.remote.duration_secs,
            sample_size: self.remote.sample_size,
            scoring: ScoringPolicy::Unscored,
        }
    }

    pub fn practice_session(&self) -> SessionConfig {
        SessionConfig {
            duration_secs: self.practice.duration_secs,
            sample_size: self.practice.sample_size,
            scoring: ScoringPolicy::GroundTruth,
        }
    }
}
