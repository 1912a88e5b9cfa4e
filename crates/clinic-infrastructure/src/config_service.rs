//! Configuration service implementation.
//!
//! Loads `ClinicConfig` from `~/.config/clinic/config.toml` (or an explicit
//! path) and caches it.

use crate::paths::ClinicPaths;
use clinic_core::config::ClinicConfig;
use clinic_core::{ClinicError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the client configuration.
///
/// A missing file yields the defaults; a malformed file is an error.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClinicConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config file.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(ClinicPaths::config_file()?))
    }

    /// Creates a ConfigService reading a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ClinicConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_config(&self.path)?;

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    fn load_config(path: &Path) -> Result<ClinicConfig> {
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] {} not found, using defaults",
                path.display()
            );
            return Ok(ClinicConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ClinicError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: ClinicConfig = toml::from_str(&content)?;
        tracing::debug!("[ConfigService] Loaded {}", path.display());
        Ok(config)
    }
}
