//! Configuration file loading for strata.
//!
//! Reads `strata.json` at the project root and provides typed access to all
//! settings. Falls back to sensible defaults when the config file is missing
//! or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level strata configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrataConfig {
    /// Lowest platform version the project claims to support.
    #[serde(default = "default_min_version")]
    pub min_version: u32,
    /// Catalog database path, relative to the project root.
    #[serde(default = "default_catalog")]
    pub catalog: String,
    /// Directories searched for compiled unit files (`*.scu`).
    #[serde(default = "default_unit_dirs")]
    pub unit_dirs: Vec<String>,
    /// Directories searched for UI documents (`*.xml`).
    #[serde(default = "default_resource_dirs")]
    pub resource_dirs: Vec<String>,
}

fn default_min_version() -> u32 {
    1
}
fn default_catalog() -> String {
    "api-versions.xml".to_string()
}
fn default_unit_dirs() -> Vec<String> {
    vec!["bin".to_string()]
}
fn default_resource_dirs() -> Vec<String> {
    vec!["res".to_string()]
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            min_version: default_min_version(),
            catalog: default_catalog(),
            unit_dirs: default_unit_dirs(),
            resource_dirs: default_resource_dirs(),
        }
    }
}

impl StrataConfig {
    /// Load configuration from `strata.json` inside the given project
    /// directory. Returns defaults if the file doesn't exist or can't be
    /// parsed.
    pub fn load(project_dir: &Path) -> Self {
        let config_path = project_dir.join("strata.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!(
                    "strata: warning: failed to parse {}: {}, using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
