//! Path management for clinic configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/clinic/            # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── seed.toml                # Optional emulator seed for the CLI
//! ```

use clinic_core::{ClinicError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "clinic";

pub struct ClinicPaths;

impl ClinicPaths {
    /// Returns the clinic configuration directory (e.g. `~/.config/clinic/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ClinicError::config("Cannot find config directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the default emulator seed file.
    pub fn seed_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("seed.toml"))
    }
}
