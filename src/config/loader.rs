//! Configuration loading from file system
//!
//! Reads `config.json` from the data directory. A missing or unparsable file
//! is never fatal: the defaults are used and a warning is logged.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use super::defaults::CONFIG_FILE_NAME;
use super::types::Config;
use crate::error::{Result, StickyNotesError};

/// Default location: `<data dir>/config.json`
pub fn default_config_path() -> PathBuf {
    crate::notes::default_data_dir().join(CONFIG_FILE_NAME)
}

/// Load configuration from `path`, falling back to defaults.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Config {
    match try_load_config(path) {
        Ok(Some(config)) => {
            info!("Successfully loaded config");
            config
        }
        Ok(None) => {
            info!("Config file not found, using defaults");
            Config::default()
        }
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    }
}

/// Strict variant: `Ok(None)` when the file does not exist.
pub fn try_load_config(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|e| StickyNotesError::io(path, e))?;
    let config: Config = serde_json::from_str(&contents)
        .map_err(|e| StickyNotesError::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}
