//! Persistent configuration store
//!
//! Deep sleep wipes RAM, so the configuration and the one-byte setup
//! marker live behind this boundary. On a file-backed host that is a TOML
//! file plus a marker file; on the device it is a flash page.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::DeviceConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config did not parse: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config did not serialize: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config invalid: {0}")]
    Invalid(String),
}

/// Read-at-boot / write-on-change configuration persistence.
pub trait ConfigStore {
    fn load(&self) -> Result<DeviceConfig, ConfigError>;

    fn save(&mut self, config: &DeviceConfig) -> Result<(), ConfigError>;

    /// Reserved byte recording whether the last cycle completed setup.
    fn read_setup_marker(&self) -> bool;

    fn write_setup_marker(&mut self, ok: bool) -> Result<(), ConfigError>;
}

/// TOML-file store under a data directory.
pub struct FileStore {
    config_path: PathBuf,
    marker_path: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            config_path: dir.join("lapsecam.toml"),
            marker_path: dir.join("setup.marker"),
        }
    }

    /// Default data directory for the host build.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Lapsecam")
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

impl ConfigStore for FileStore {
    fn load(&self) -> Result<DeviceConfig, ConfigError> {
        let content = std::fs::read_to_string(&self.config_path)?;
        let config: DeviceConfig = toml::from_str(&content)?;
        config.validate()?;

        debug!("loaded config from {:?}", self.config_path);
        Ok(config)
    }

    fn save(&mut self, config: &DeviceConfig) -> Result<(), ConfigError> {
        if let Some(dir) = self.config_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        debug!("saved config to {:?}", self.config_path);
        Ok(())
    }

    fn read_setup_marker(&self) -> bool {
        std::fs::read(&self.marker_path)
            .map(|bytes| bytes.first() == Some(&1))
            .unwrap_or(false)
    }

    fn write_setup_marker(&mut self, ok: bool) -> Result<(), ConfigError> {
        if let Some(dir) = self.marker_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.marker_path, [u8::from(ok)])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        let mut config = DeviceConfig::default();
        config.sleep_interval_secs = 600;
        config.wifi_ssid = "apiary".to_string();
        config.endpoint_url = "https://example.org/upload.php".to_string();

        store.save(&config).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_config_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(matches!(store.load(), Err(ConfigError::Io(_))));
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.config_path(), "sleep_interval_secs = \"soon\"").unwrap();

        assert!(matches!(store.load(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_config_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.config_path(), "sleep_interval_secs = 0").unwrap();

        assert!(matches!(store.load(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn setup_marker_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert!(!store.read_setup_marker());

        store.write_setup_marker(true).unwrap();
        assert!(store.read_setup_marker());

        store.write_setup_marker(false).unwrap();
        assert!(!store.read_setup_marker());
    }
}
