//! Configuration management using config.toml

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use game_shelf_core::{Category, CategoryCatalog};
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Exported game library (JSON array of games)
    #[serde(default = "default_library_path")]
    pub library_path: String,

    /// Window width (None = default 1024)
    #[serde(default)]
    pub window_width: Option<f32>,

    /// Window height (None = default 768)
    #[serde(default)]
    pub window_height: Option<f32>,

    /// Display label overrides, keyed by category key (`single`, `multi`, `coop`, `pvp`)
    #[serde(default)]
    pub category_labels: BTreeMap<String, String>,
}

fn default_library_path() -> String {
    "games.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: default_library_path(),
            window_width: None,
            window_height: None,
            category_labels: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load config from file, creating default if it doesn't exist
    pub fn load() -> Self {
        if Path::new(CONFIG_PATH).exists() {
            match fs::read_to_string(CONFIG_PATH) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Error parsing {}: {}", CONFIG_PATH, e),
                },
                Err(e) => tracing::warn!("Error reading {}: {}", CONFIG_PATH, e),
            }
            return Config::default();
        }

        let config = Config::default();
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default {}: {}", CONFIG_PATH, e);
        }
        config
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(CONFIG_PATH, content)?;
        Ok(())
    }

    /// Category catalog for the grid, with configured labels applied
    pub fn category_catalog(&self) -> CategoryCatalog {
        let mut labels = BTreeMap::new();
        for (key, label) in &self.category_labels {
            match key.parse::<Category>() {
                Ok(category) => {
                    labels.insert(category, label.clone());
                }
                Err(e) => tracing::warn!("Ignoring category label override: {}", e),
            }
        }
        CategoryCatalog::default().with_labels(&labels)
    }
}
