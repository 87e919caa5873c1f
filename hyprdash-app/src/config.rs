use anyhow::{bail, Context, Result};
use hyprdash_core::{ActionEntry, CommandTable, EnvContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-deployment settings read from `config.yaml`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_dir: Option<PathBuf>,
    /// Replace built-in actions with the same id, or add new ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionEntry>,
    /// Built-in action ids to remove from the table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

impl Config {
    /// `$XDG_CONFIG_HOME/hyprdash/config.yaml`, else `~/.config/hyprdash/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME")
                    .filter(|value| !value.is_empty())
                    .map(|home| PathBuf::from(home).join(".config"))
            })?;
        Some(base.join("hyprdash").join("config.yaml"))
    }

    /// Loads `path`, or the default path. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Checks the overrides against a scratch table so errors surface at
    /// startup rather than on first click.
    pub fn validate(&self) -> Result<()> {
        let mut scratch = CommandTable::new();
        for entry in &self.actions {
            scratch
                .register(entry.clone())
                .with_context(|| format!("Invalid action '{}' in config", entry.id))?;
        }
        for id in &self.disabled {
            if id.trim().is_empty() {
                bail!("Empty id in 'disabled'");
            }
        }
        Ok(())
    }

    /// Built-in table with this config's overrides applied.
    pub fn build_table(&self) -> Result<CommandTable> {
        let mut table = CommandTable::builtin();
        for entry in &self.actions {
            table.register(entry.clone())?;
        }
        for id in &self.disabled {
            if table.remove(id).is_none() {
                tracing::warn!("Disabled action '{}' is not registered", id);
            }
        }
        Ok(table)
    }

    pub fn apply_env(&self, env: EnvContext) -> EnvContext {
        match &self.image_dir {
            Some(dir) => env.with_image_dir(dir),
            None => env,
        }
    }
}
