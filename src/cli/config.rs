//! Registry configuration loading.
//!
//! A single JSON document, conventionally at `~/.recreate.json`, with one
//! recognized field:
//!
//! ```json
//! { "registries": [{ "host": "registry.example.com", "username": "ops", "password": "..." }] }
//! ```
//!
//! Absence of the file is not an error and yields an empty registry list;
//! a present but malformed file is.

use crate::recreate::{RecreateError, RegistryConf, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up under the user's home directory.
pub const CONF_FILE_NAME: &str = ".recreate.json";

/// All configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conf {
    /// Registry credentials, in order
    #[serde(default)]
    pub registries: Vec<RegistryConf>,
}

impl Conf {
    /// Load from the conventional location, `~/.recreate.json`.
    ///
    /// A missing file — or an undeterminable home directory — yields the
    /// empty configuration.
    pub fn load_default() -> Result<Self> {
        let Some(home) = home_dir() else {
            debug!("no home directory, using empty configuration");
            return Ok(Self::default());
        };

        let path = home.join(CONF_FILE_NAME);
        if !path.is_file() {
            debug!(path = %path.display(), "no configuration file, using empty configuration");
            return Ok(Self::default());
        }

        Self::from_json_file(&path)
    }

    /// Load from an explicit path; here a missing file is an error.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            RecreateError::Config(format!("malformed {}: {}", path.display(), e))
        })
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .or_else(|| env::var("USERPROFILE").ok())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_populated_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"registries": [
                {{"host": "registry.example.com", "username": "ops", "password": "secret"}},
                {{"host": "localhost:5000"}}
            ]}}"#
        )
        .unwrap();

        let conf = Conf::from_json_file(file.path()).unwrap();
        assert_eq!(conf.registries.len(), 2);
        assert_eq!(conf.registries[0].host, "registry.example.com");
        assert_eq!(conf.registries[0].username.as_deref(), Some("ops"));
        assert_eq!(conf.registries[1].host, "localhost:5000");
        assert!(conf.registries[1].username.is_none());
    }

    #[test]
    fn test_registries_field_is_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let conf = Conf::from_json_file(file.path()).unwrap();
        assert!(conf.registries.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            Conf::from_json_file(file.path()),
            Err(RecreateError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        assert!(matches!(
            Conf::from_json_file("/nonexistent/recreate.json"),
            Err(RecreateError::Io(_))
        ));
    }
}
