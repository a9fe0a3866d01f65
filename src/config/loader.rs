// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Read a pipeline definition from `path` and return the raw, unvalidated
/// [`RawConfigFile`].
///
/// This only performs TOML deserialization; use [`load_and_validate`] for the
/// semantic checks (dependency structure, command shape).
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a pipeline definition and run validation.
///
/// This is the entry point the rest of the application uses:
///
/// - Reads TOML, applying `serde` defaults.
/// - Checks that at least one task exists and every `cmd` is non-empty.
/// - Builds the dependency graph once to reject unknown prerequisites and
///   cycles up front.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default pipeline definition path: `Pipeflow.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Pipeflow.toml")
}
