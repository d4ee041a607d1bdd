use std::env;
use std::path::{Path, PathBuf};

/// Plan store configuration.
///
/// The caller picks the directory; [`StoreConfig::default_data_dir`] is the
/// XDG fallback.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the persisted plan blob.
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Key of the blob holding the JSON array of plans.
    pub const PLANS_KEY: &str = "dateNightPlans";

    /// Build a config from an explicit directory (useful for tests and CLI flags).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Return the default data directory.
    ///
    /// Uses XDG layout: `$XDG_DATA_HOME/datenight` or `~/.local/share/datenight`.
    pub fn default_data_dir() -> PathBuf {
        if let Ok(xdg) = env::var("XDG_DATA_HOME") {
            if !xdg.is_empty() {
                return PathBuf::from(xdg).join("datenight");
            }
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("share")
            .join("datenight")
    }

    /// Path of the file backing the plans blob.
    pub fn plans_path(&self) -> PathBuf {
        blob_path(&self.data_dir, Self::PLANS_KEY)
    }
}

pub(crate) fn blob_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}
