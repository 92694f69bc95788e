//! Configuration for the gradebook
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a gradebook instance
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the CSV backing file; created on first persist if absent
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./students.csv"),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
