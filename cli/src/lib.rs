use locator::LocatorConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardKitError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// One localization job: a board photograph, where its outputs go and the
/// pipeline parameters to use.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BoardJob {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub locator: LocatorConfig,
}

impl BoardJob {
    /// Load a job from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, BoardKitError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a job from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, BoardKitError> {
        let job: BoardJob = toml::from_str(content)?;
        Ok(job)
    }

    /// Load a job from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, BoardKitError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a job from a JSON string
    pub fn from_json(content: &str) -> Result<Self, BoardKitError> {
        let job: BoardJob = serde_json::from_str(content)?;
        Ok(job)
    }

    /// Auto-detect file format and load the job
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BoardKitError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(BoardKitError::UnsupportedFileFormat),
        }
    }

    /// Save the job to a TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BoardKitError> {
        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Convert the job to a TOML string
    pub fn to_toml(&self) -> Result<String, BoardKitError> {
        Ok(toml::to_string_pretty(&self)?)
    }
}
