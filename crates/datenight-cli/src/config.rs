//! Configuration file management for datenight.
//!
//! Provides a TOML-based config file at `~/.config/datenight/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use datenight_core::ProviderConfig;
use datenight_store::StoreConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub client: ClientSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    /// Hugging Face access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ClientSection {
    /// Base URL of the idea API, e.g. `http://127.0.0.1:3000/api`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the datenight config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/datenight` or
/// `~/.config/datenight`, also on macOS.
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = env_var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("datenight");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("datenight")
}

/// Return the path to the datenight config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    load_config_from(&config_path())
}

fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    save_config_to(config, &config_path())
}

fn save_config_to(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    // The file may hold the provider token.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

/// A config file with every default spelled out, for `datenight init`.
pub fn starter_config(api_key: Option<String>) -> ConfigFile {
    ConfigFile {
        provider: ProviderSection {
            api_key,
            model: Some(ProviderConfig::DEFAULT_MODEL.to_string()),
            base_url: Some(ProviderConfig::DEFAULT_BASE_URL.to_string()),
        },
        client: ClientSection {
            api_url: Some(DatenightConfig::DEFAULT_API_URL.to_string()),
        },
        store: StoreSection { data_dir: None },
        server: ServerSection {
            bind: Some(DatenightConfig::DEFAULT_BIND.to_string()),
            port: Some(DatenightConfig::DEFAULT_PORT),
        },
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct DatenightConfig {
    pub provider: ProviderConfig,
    /// Base URL the idea client talks to.
    pub api_url: String,
    pub store: StoreConfig,
    pub bind: String,
    pub port: u16,
}

impl DatenightConfig {
    pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";
    pub const DEFAULT_BIND: &str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 3000;

    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - API URL: `cli_api_url` > `DATENIGHT_API_URL` > `client.api_url` > [`Self::DEFAULT_API_URL`]
    /// - Data dir: `cli_data_dir` > `DATENIGHT_DATA_DIR` > `store.data_dir` > XDG data dir
    /// - Provider: `HUGGINGFACE_API_KEY` / `HF_MODEL` / `HF_BASE_URL` > `[provider]` > defaults
    /// - Server: `[server]` > defaults (the `serve` flags override later)
    pub fn resolve(cli_api_url: Option<&str>, cli_data_dir: Option<&Path>) -> Self {
        let path = config_path();
        let file_config = if path.exists() {
            match load_config_from(&path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!(path = %path.display(), error = %format!("{e:#}"), "ignoring unreadable config file");
                    ConfigFile::default()
                }
            }
        } else {
            ConfigFile::default()
        };

        Self::resolve_with(file_config, cli_api_url, cli_data_dir)
    }

    fn resolve_with(
        file: ConfigFile,
        cli_api_url: Option<&str>,
        cli_data_dir: Option<&Path>,
    ) -> Self {
        let api_url = cli_api_url
            .map(str::to_string)
            .or_else(|| env_var("DATENIGHT_API_URL"))
            .or(file.client.api_url)
            .unwrap_or_else(|| Self::DEFAULT_API_URL.to_string());

        let data_dir = cli_data_dir
            .map(Path::to_path_buf)
            .or_else(|| env_var("DATENIGHT_DATA_DIR").map(PathBuf::from))
            .or(file.store.data_dir)
            .unwrap_or_else(StoreConfig::default_data_dir);

        let api_key = env_var("HUGGINGFACE_API_KEY").or(file.provider.api_key);
        let model = env_var("HF_MODEL")
            .or(file.provider.model)
            .unwrap_or_else(|| ProviderConfig::DEFAULT_MODEL.to_string());
        let base_url = env_var("HF_BASE_URL")
            .or(file.provider.base_url)
            .unwrap_or_else(|| ProviderConfig::DEFAULT_BASE_URL.to_string());

        Self {
            provider: ProviderConfig::new(api_key)
                .with_model(model)
                .with_base_url(base_url),
            api_url,
            store: StoreConfig::new(data_dir),
            bind: file
                .server
                .bind
                .unwrap_or_else(|| Self::DEFAULT_BIND.to_string()),
            port: file.server.port.unwrap_or(Self::DEFAULT_PORT),
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
