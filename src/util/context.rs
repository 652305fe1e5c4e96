//! Global context for logicmap operations.
//!
//! Provides centralized access to configuration, paths, and the manifest
//! being compiled.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::{find_manifest as find_manifest_in, Manifest, ManifestError};
use crate::util::config::{global_config_path, load_config, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Whether to use colors in output
    color: bool,

    /// Merged global and project configuration
    config: Config,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let config = load_config(global_config_path().as_deref(), &cwd);

        GlobalContext {
            cwd,
            color: true,
            config,
        }
    }

    /// Replace the loaded configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find the manifest file starting from cwd and searching upward.
    ///
    /// Returns an error if both manifest names exist in the same directory.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        let mut current = self.cwd.clone();
        loop {
            match find_manifest_in(&current) {
                Ok(path) => return Ok(path),
                Err(ManifestError::NotFound { .. }) => {
                    if !current.pop() {
                        return Err(ManifestError::NotFound {
                            dir: self.cwd.clone(),
                        });
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Pick the manifest to compile: an explicit path, else the configured
    /// one, else the nearest manifest above the cwd.
    pub fn resolve_manifest_path(&self, explicit: Option<&Path>) -> Result<PathBuf, ManifestError> {
        if let Some(path) = explicit {
            return Ok(self.cwd.join(path));
        }
        if let Some(path) = &self.config.manifest {
            return Ok(self.cwd.join(path));
        }
        self.find_manifest()
    }

    /// Resolve and load the manifest.
    pub fn load_manifest(&self, explicit: Option<&Path>) -> Result<(PathBuf, Manifest)> {
        let path = self.resolve_manifest_path(explicit)?;
        tracing::debug!("using manifest {}", path.display());
        let manifest = Manifest::load(&path)?;
        Ok((path, manifest))
    }
}
