// src/core/config.rs

use crate::constants::{
    BOUNDARY_MARKER, CONFIG_ENV_VAR, CONFIG_FILENAME, PROJECT_MARKER, ROOT_VARIABLE,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file '{path}': {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// User-level settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClideConfig {
    /// Name of the directory that holds a project's command tree.
    pub project_marker: String,
    /// Directory name that stops the upward search for the marker.
    pub boundary_marker: String,
    /// Environment variable that receives the tree root path.
    pub root_variable: String,
}

impl Default for ClideConfig {
    fn default() -> Self {
        Self {
            project_marker: PROJECT_MARKER.to_string(),
            boundary_marker: BOUNDARY_MARKER.to_string(),
            root_variable: ROOT_VARIABLE.to_string(),
        }
    }
}

/// Location of the config file: `$CLIDE_CONFIG`, else `<config_dir>/clide/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    match env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => dirs::config_dir().map(|dir| dir.join("clide").join(CONFIG_FILENAME)),
    }
}

/// Loads the user config, falling back to defaults when there is none.
pub fn load_config() -> Result<ClideConfig, ConfigError> {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            log::debug!("No config directory on this platform, using defaults");
            Ok(ClideConfig::default())
        }
    }
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load_from(path: &Path) -> Result<ClideConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("'{}' not found, using default config", path.display());
            return Ok(ClideConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    log::debug!("Loading config from '{}'", path.display());
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ClideConfig::default());
        assert_eq!(config.root_variable, "CLIDE_PATH");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "root_variable = \"PROJECT_ROOT\"\n").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.root_variable, "PROJECT_ROOT");
        assert_eq!(config.project_marker, ".clide");
        assert_eq!(config.boundary_marker, ".git");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "project_marker = [").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::TomlParse { .. })));
    }
}
