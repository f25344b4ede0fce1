use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use unredact_core::{DEFAULT_MASK_GLYPH, DEFAULT_MASK_TOKEN};
use unredact_engine::UnredactorConfig;

/// Simple configuration for unredact
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub mask: MaskConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Placeholder sent to the service for each redacted word
    #[serde(default = "default_token")]
    pub token: String,

    /// Glyph used to draw redacted words in plain-text output
    #[serde(default = "default_glyph")]
    pub glyph: char,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
            glyph: default_glyph(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:5000/unredact".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_token() -> String {
    DEFAULT_MASK_TOKEN.to_string()
}

fn default_glyph() -> char {
    DEFAULT_MASK_GLYPH
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse TOML from {}", path.display()))?;
        Ok(config)
    }

    /// Get config file path (`UNREDACT_CONFIG` overrides the platform default)
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("UNREDACT_CONFIG") {
            return PathBuf::from(path);
        }
        if let Some(dirs) = directories::ProjectDirs::from("com", "unredact", "unredact") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.unredact/config.toml")
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.service.timeout_ms)
    }

    pub fn unredactor_config(&self) -> UnredactorConfig {
        UnredactorConfig {
            mask_token: self.mask.token.clone(),
            request_timeout: self.request_timeout(),
        }
    }
}
