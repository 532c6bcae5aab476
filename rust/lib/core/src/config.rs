use std::path::PathBuf;

/// Runtime configuration shared by the modules.
///
/// Filled in by the server binary from its TOML file and CLI flags.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the redb file.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/knitflow.redb`.
    pub db_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,

    /// Decimal places used when production rates are rendered for display.
    pub display_decimals: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_path: None,
            listen: "0.0.0.0:8080".to_string(),
            display_decimals: 2,
        }
    }
}

impl ServiceConfig {
    /// Resolve the redb path, falling back to `{data_dir}/knitflow.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            self.data_dir
                .as_ref()
                .map(|d| d.join("knitflow.redb"))
                .unwrap_or_else(|| PathBuf::from("knitflow.redb"))
        })
    }
}
