// src/core/config_manager.rs
//! Configuration: optional `config.yaml` sections, overridden by environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub reviewer: ReviewerConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    pub name: String,
    pub address: String,
    pub port: u16,
    pub log_path: PathBuf,
}

#[derive(Clone, PartialEq)]
pub struct ReviewerConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

// The key must never reach a log line.
impl fmt::Debug for ReviewerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewerConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ReviewerConfig {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SectionFile {
    address: Option<String>,
    port: Option<u16>,
    log_path: Option<PathBuf>,
    api_url: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: SectionFile,
    #[serde(default)]
    production: SectionFile,
}

/// Environment values that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub environment: Option<String>,
    pub port: Option<String>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_process() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            environment: var("ENVIRONMENT"),
            port: var("ROCKET_PORT"),
            api_url: var("RESUME_REVIEW_API_URL"),
            api_key: var("RESUME_REVIEW_API_KEY").or_else(|| var("GEMINI_API_KEY")),
        }
    }
}

impl ConfigManager {
    /// Load from `./config.yaml` (if present) and the process environment.
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(CONFIG_FILE);
        let yaml = if path.exists() {
            Some(std::fs::read_to_string(&path).context("Failed to read config.yaml")?)
        } else {
            None
        };

        Self::from_sources(yaml.as_deref(), EnvOverrides::from_process())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_sources(Some(&yaml), EnvOverrides::from_process())
    }

    /// Warn about settings that will only fail later, at request time.
    pub fn log_warnings(&self) {
        if self.reviewer.api_key.is_none() {
            warn!("No API key configured; review requests will be rejected by the API");
        }
    }

    pub fn from_sources(yaml: Option<&str>, env: EnvOverrides) -> Result<Self> {
        let file: ConfigFile = match yaml {
            Some(content) => serde_yaml::from_str(content).context("Failed to parse config.yaml")?,
            None => ConfigFile::default(),
        };

        let name = env.environment.unwrap_or_else(|| "local".to_string());
        let section = match name.as_str() {
            "production" => file.production,
            _ => file.local,
        };

        let port = match env.port {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?,
            None => section.port.unwrap_or(8000),
        };

        Ok(Self {
            environment: EnvironmentConfig {
                name,
                address: section.address.unwrap_or_else(|| "127.0.0.1".to_string()),
                port,
                log_path: section
                    .log_path
                    .unwrap_or_else(|| PathBuf::from("/tmp/resume-review.log")),
            },
            reviewer: ReviewerConfig {
                api_url: env
                    .api_url
                    .or(section.api_url)
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                api_key: env.api_key,
                timeout_seconds: section.timeout_seconds,
            },
        })
    }
}
