//! Configuration management for record generation
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (records.toml)
//! - Environment variables (RECORDS__*)
//!
//! ## Example config file (records.toml):
//! ```toml
//! [input]
//! schema = "vendor/debug-adapter-protocol/debugAdapterProtocol.json"
//!
//! [output]
//! path = "lib/dap.rb"
//! target = "ruby"
//! ```

use config_crate::builder::{ConfigBuilder, DefaultState};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::codegen::Target;
use crate::error::Result;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Input settings
    #[serde(default)]
    pub input: InputConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the JSON Schema document
    #[serde(default)]
    pub schema: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File to write; stdout when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Record syntax to emit
    #[serde(default)]
    pub target: Target,
}

impl RecordsConfig {
    /// Load configuration from the default locations, adding an explicit
    /// file (required when given) and `RECORDS__*` environment variables on top
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "records.toml",
            ".records.toml",
            "config/records.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "schema-records", "schema-records") {
            let xdg_config = config_dir.config_dir().join("records.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (RECORDS__OUTPUT__TARGET=python)
        builder = builder.add_source(
            Environment::with_prefix("RECORDS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
