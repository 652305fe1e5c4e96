//! Configuration file support for logicmap.
//!
//! logicmap reads two configuration files:
//! - Global: `~/.logicmap/config.toml` - User-wide defaults
//! - Project: `.logicmap/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// logicmap configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest to use when `--manifest` is not given. Relative paths are
    /// resolved against the directory holding `.logicmap/`.
    pub manifest: Option<PathBuf>,

    /// Render settings
    pub render: RenderConfig,

    /// Lint settings
    pub lint: LintConfig,
}

/// Render-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Default output directory for `logicmap render`
    pub out_dir: Option<PathBuf>,
}

/// Lint-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Treat warnings as errors
    pub deny_warnings: bool,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.manifest.is_some() {
            self.manifest = other.manifest;
        }
        if other.render.out_dir.is_some() {
            self.render.out_dir = other.render.out_dir;
        }
        if other.lint.deny_warnings {
            self.lint.deny_warnings = true;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.logicmap/config.toml)
/// 2. Global config (~/.logicmap/config.toml)
/// 3. Defaults
///
/// A relative `manifest` in the project config is anchored at `project_root`.
pub fn load_config(global_path: Option<&Path>, project_root: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    let mut project = Config::load_or_default(&project_config_path(project_root));
    if let Some(manifest) = project.manifest.take() {
        project.manifest = Some(if manifest.is_relative() {
            project_root.join(manifest)
        } else {
            manifest
        });
    }
    config.merge(project);

    config
}

/// Get the global logicmap config directory (~/.logicmap).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".logicmap"))
}

/// Get the global config path (~/.logicmap/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.logicmap/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".logicmap").join("config.toml")
}
