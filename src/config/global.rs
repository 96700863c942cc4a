// ~/.config/ghpm/config.json: last confirmed repository and its owner.
// ref: serde_json crate, https://docs.rs/serde_json/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// `owner/name`, empty when nothing was chosen yet.
    #[serde(default)]
    pub selected_repository: String,
    #[serde(default)]
    pub selected_owner: String,
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ghpm")
            .join("config.json")
    }

    /// Missing file means no prior selection.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Best-effort overwrite; no crash-consistency guarantee.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("saved config to {}", path.display());
        Ok(())
    }

    pub fn select(&mut self, owner: &str, repository: &str) {
        self.selected_owner = owner.to_string();
        self.selected_repository = repository.to_string();
    }
}
