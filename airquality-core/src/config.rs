use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf, time::Duration};

use crate::provider::ProviderId;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

pub const HOST_ENV_VAR: &str = "AIRQUALITY_HOST";
pub const PORT_ENV_VAR: &str = "AIRQUALITY_PORT";

/// Configuration for a single provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Overrides the provider's public endpoint (useful for proxies and tests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Listen address of the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timeout applied to every outbound provider request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub server: ServerConfig,

    /// Example TOML:
    /// [providers.airnow]
    /// api_key = "..."
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            server: ServerConfig::default(),
            providers: BTreeMap::new(),
        }
    }
}

/// The two provider secrets, resolved once at start-up and read-only afterwards.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub geocoding_key: Option<String>,
    pub air_quality_key: Option<String>,
}

impl ApiKeys {
    pub fn new(geocoding_key: Option<String>, air_quality_key: Option<String>) -> Self {
        Self {
            geocoding_key,
            air_quality_key,
        }
    }

    /// Returns the key for a provider; an empty key counts as not configured.
    pub fn key(&self, id: ProviderId) -> Option<&str> {
        let key = match id {
            ProviderId::Geocodio => self.geocoding_key.as_deref(),
            ProviderId::AirNow => self.air_quality_key.as_deref(),
        };
        key.filter(|k| !k.is_empty())
    }
}

// Keys must never reach the logs.
impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |id| if self.key(id).is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("ApiKeys")
            .field("geocoding_key", &mask(ProviderId::Geocodio))
            .field("air_quality_key", &mask(ProviderId::AirNow))
            .finish()
    }
}

impl Config {
    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Returns API key for a provider, if present and non-empty.
    pub fn provider_api_key(&self, id: ProviderId) -> Option<&str> {
        self.provider_config(id)
            .and_then(|cfg| cfg.api_key.as_deref())
            .filter(|k| !k.is_empty())
    }

    pub fn is_provider_configured(&self, id: ProviderId) -> bool {
        self.provider_api_key(id).is_some()
    }

    /// Endpoint URL for a provider, falling back to the public one.
    pub fn provider_endpoint(&self, id: ProviderId) -> String {
        self.provider_config(id)
            .and_then(|cfg| cfg.endpoint.clone())
            .unwrap_or_else(|| id.default_endpoint().to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn api_keys(&self) -> ApiKeys {
        ApiKeys::new(
            self.provider_api_key(ProviderId::Geocodio).map(str::to_owned),
            self.provider_api_key(ProviderId::AirNow).map(str::to_owned),
        )
    }

    /// Set/replace a provider API key.
    pub fn upsert_provider_api_key(&mut self, id: ProviderId, api_key: String) {
        self.providers
            .entry(id.as_str().to_string())
            .or_default()
            .api_key = Some(api_key);
    }

    /// Overlay process environment variables on top of the file values.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`; empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for id in ProviderId::all() {
            if let Some(key) = get(id.key_env_var()) {
                self.upsert_provider_api_key(*id, key);
            }
        }

        if let Some(host) = get(HOST_ENV_VAR) {
            self.server.host = host;
        }

        if let Some(port) = get(PORT_ENV_VAR) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV_VAR} must be a port number, got '{port}'"))?;
        }

        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "airquality", "airquality")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
