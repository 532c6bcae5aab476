//! Server configuration file.
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:8080"
//!
//! [storage]
//! data_dir = "/var/lib/knitflow"
//! db_path = "/var/lib/knitflow/knitflow.redb"  # optional
//!
//! [production]
//! display_decimals = 2
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub production: ProductionSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    #[serde(default)]
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    /// Where the redb file lives. Unset means an in-memory store.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Explicit redb file. Defaults to `{data_dir}/knitflow.redb`.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionSection {
    #[serde(default = "default_decimals")]
    pub display_decimals: usize,
}

impl Default for ProductionSection {
    fn default() -> Self {
        Self {
            display_decimals: default_decimals(),
        }
    }
}

fn default_decimals() -> usize {
    2
}

impl ServerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Fold file settings into the shared service config. CLI flags win.
    pub fn into_service_config(self, listen: Option<String>) -> knitflow_core::ServiceConfig {
        let defaults = knitflow_core::ServiceConfig::default();
        knitflow_core::ServiceConfig {
            data_dir: self.storage.data_dir,
            db_path: self.storage.db_path,
            listen: listen.or(self.server.listen).unwrap_or(defaults.listen),
            display_decimals: self.production.display_decimals,
        }
    }
}
