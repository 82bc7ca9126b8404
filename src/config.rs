use crate::core::PantryError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PantryConfig {
    /// File path or http(s) URL of the catalog document.
    pub catalog: String,
    pub split_whitespace: bool,
    pub show_preparation: bool,
}

// Default configuration if file is missing
impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            catalog: "rezepte.json".to_string(),
            split_whitespace: false,
            show_preparation: false,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join("config.toml"),
        }
    }

    // Load config or create default if missing
    pub async fn load(&self) -> Result<PantryConfig, PantryError> {
        if !self.path.exists() {
            let default_config = PantryConfig::default();
            self.save(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.path).await?;
        toml::from_str(&content).map_err(PantryError::ConfigParse)
    }

    pub async fn save(&self, config: &PantryConfig) -> Result<(), PantryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}
