//! Configuration file loading for the terminal board.
//!
//! Settings come from `chess-cli.toml` in the working directory unless a
//! path is given on the command line. Every field is optional.

use chess_core::PromotionKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for a terminal session.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Promotion choice applied without asking. `None` asks on the terminal.
    #[serde(default)]
    pub auto_promote: Option<PromotionKind>,
    /// Label ranks and files when drawing the board. Defaults to true.
    #[serde(default = "default_show_coordinates")]
    pub show_coordinates: bool,
    /// Starting placement, rank by rank from the top, separated by `/`.
    /// Defaults to the standard setup.
    #[serde(default)]
    pub start_placement: Option<String>,
}

fn default_show_coordinates() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            auto_promote: None,
            show_coordinates: default_show_coordinates(),
            start_placement: None,
        }
    }
}

impl CliConfig {
    /// Default file name looked up in the working directory.
    pub const FILE_NAME: &'static str = "chess-cli.toml";

    /// Loads configuration from `path`, or from [`Self::FILE_NAME`] if none
    /// is given.
    ///
    /// A missing default file yields the default configuration. A missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(Self::FILE_NAME), false),
        };
        if !explicit && !path.exists() {
            tracing::debug!("no {} found, using defaults", Self::FILE_NAME);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&content)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
