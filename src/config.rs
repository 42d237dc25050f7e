use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::Deserialize;
use thiserror::Error;

static CONFIG_FILENAME: &str = "spritepack.toml";

/// Configuration for a sprite project, read from an optional
/// `spritepack.toml` file in the project root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Rows of sprites wrap once adding a sprite would make them wider than
    /// this.
    pub row_width: u32,

    /// Transparent spacing between sprites and between rows, in pixels.
    pub gutter: u32,

    /// Folder containing one subfolder per sprite sheet, relative to the
    /// project root.
    pub sprites_folder: PathBuf,

    /// Folder that packed sheets and manifests are written to, relative to
    /// the project root.
    pub output_folder: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            row_width: 1024,
            gutter: 1,
            sprites_folder: PathBuf::from("sprites"),
            output_folder: ["public", "sprites"].iter().collect(),
        }
    }
}

impl Config {
    /// Reads the config from the given project folder, falling back to the
    /// defaults if the folder has no config file.
    pub fn read_from_folder_or_default<P: AsRef<Path>>(
        folder_path: P,
    ) -> Result<Self, ConfigError> {
        match Self::read_from_folder(folder_path) {
            Ok(config) => Ok(config),
            Err(err) if err.is_not_found() => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let file_path = folder_path.as_ref().join(CONFIG_FILENAME);
        let contents = fs::read(&file_path)?;

        let config = toml::from_slice(&contents).map_err(|source| ConfigError::Toml {
            path: file_path.clone(),
            source,
        })?;

        log::debug!("Read config from {}", file_path.display());

        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source} in {}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
