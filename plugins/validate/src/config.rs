use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs the validator reads at run time. The defaults are the fixed
/// behaviour of `tausi validate`/`tausi clean`; a config file only ever
/// replaces whole lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Directory names never descended into, at any depth
    #[serde(default = "default_skip_directories")]
    pub skip_directories: Vec<String>,

    /// Extensions (without the dot) whose content is never read
    #[serde(default = "default_binary_extensions")]
    pub binary_extensions: Vec<String>,

    /// Scaffold that `clean` always ensures exists
    #[serde(default = "default_required_directories")]
    pub required_directories: Vec<String>,
}

fn default_skip_directories() -> Vec<String> {
    to_strings(&["node_modules", ".git", "dist", "build"])
}

fn default_binary_extensions() -> Vec<String> {
    to_strings(&["png", "jpg", "jpeg", "gif", "ico", "svg"])
}

fn default_required_directories() -> Vec<String> {
    to_strings(&[
        "frontend",
        "backend",
        "docs",
        "deployment",
        "frontend/src",
        "frontend/src/components",
        "frontend/src/styles",
        "frontend/src/utils",
        "frontend/public",
        "frontend/public/assets",
        "backend/src",
        "backend/src/routes",
        "backend/src/middleware",
        "backend/src/utils",
        "backend/src/database",
    ])
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            skip_directories: default_skip_directories(),
            binary_extensions: default_binary_extensions(),
            required_directories: default_required_directories(),
        }
    }
}

impl ValidatorConfig {
    pub fn is_skipped_directory(&self, name: &str) -> bool {
        self.skip_directories.iter().any(|skip| skip == name)
    }

    pub fn is_binary(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.binary_extensions.iter().any(|binary| binary == ext))
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ValidatorConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    if path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
        return toml::from_str(&content)
            .with_context(|| format!("Failed to parse {} as TOML", path.display()));
    }

    // Try to parse as YAML first, then JSON
    if let Ok(config) = serde_yaml::from_str::<ValidatorConfig>(&content) {
        Ok(config)
    } else if let Ok(config) = serde_json::from_str::<ValidatorConfig>(&content) {
        Ok(config)
    } else {
        Err(anyhow::anyhow!(
            "Failed to parse validator configuration {} as YAML or JSON",
            path.display()
        ))
    }
}
